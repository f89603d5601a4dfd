use crate::application::contacts::get::CONTACT_NOT_FOUND;
use crate::application::uploads::validate_image;
use crate::domain::contacts::ContactRepository;
use crate::domain::images::{ImageInfo, ImageStore, ImageUpload};
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct UploadContactImageUseCase {
    repo: Arc<dyn ContactRepository>,
    image_store: Arc<dyn ImageStore>,
}

impl UploadContactImageUseCase {
    pub fn new(repo: Arc<dyn ContactRepository>, image_store: Arc<dyn ImageStore>) -> Self {
        Self { repo, image_store }
    }

    #[tracing::instrument(skip(self, image))]
    pub async fn execute(
        &self,
        user_id: i64,
        id: i64,
        image: ImageUpload,
    ) -> Result<ImageInfo, AppError> {
        validate_image(&image)?;

        if self.repo.find_by_id(user_id, id).await?.is_none() {
            return Err(AppError::NotFound(CONTACT_NOT_FOUND.to_string()));
        }

        let uploaded = self.image_store.upload(image).await?;

        if self
            .repo
            .update_image(user_id, id, &uploaded.secure_url)
            .await?
            .is_none()
        {
            // Contact was deleted while the upload was in flight.
            if let Err(e) = self.image_store.delete(&uploaded.public_id).await {
                tracing::error!(public_id = %uploaded.public_id, "failed to delete orphaned image: {:?}", e);
            }
            return Err(AppError::NotFound(CONTACT_NOT_FOUND.to_string()));
        }

        Ok(uploaded.into())
    }
}
