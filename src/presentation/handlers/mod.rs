use crate::domain::images::ImageUpload;
use crate::shared::error::{AppError, FieldViolation};
use axum::extract::Multipart;

pub mod addresses;
pub mod auth;
pub mod contacts;
pub mod health;

pub const IMAGE_FIELD: &str = "image";

/// Pull the `image` part out of a multipart body. Size and type are checked
/// by the use case.
pub async fn image_field(mut multipart: Multipart) -> Result<ImageUpload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or(IMAGE_FIELD).to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        return Ok(ImageUpload {
            bytes: bytes.to_vec(),
            file_name,
            content_type,
        });
    }

    Err(AppError::Validation(vec![FieldViolation::new(
        IMAGE_FIELD,
        "Invalid file.",
    )]))
}
