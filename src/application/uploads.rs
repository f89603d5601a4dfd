use crate::domain::images::ImageUpload;
use crate::shared::error::{AppError, FieldViolation};

pub const MAX_IMAGE_BYTES: usize = 5_000_000;
pub const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

pub fn validate_image(image: &ImageUpload) -> Result<(), AppError> {
    let mut violations = Vec::new();

    if image.bytes.is_empty() {
        violations.push(FieldViolation::new("image", "Invalid file."));
    }
    if image.bytes.len() > MAX_IMAGE_BYTES {
        violations.push(FieldViolation::new("image", "Max image size is 5MB."));
    }
    if !ACCEPTED_IMAGE_TYPES.contains(&image.content_type.as_str()) {
        violations.push(FieldViolation::new(
            "image",
            "Only .jpg, .jpeg, .png and .webp formats are supported.",
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}
