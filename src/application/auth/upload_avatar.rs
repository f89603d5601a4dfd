use crate::application::uploads::validate_image;
use crate::domain::images::{ImageInfo, ImageStore, ImageUpload};
use crate::domain::users::{User, UserRepository};
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct UploadAvatarUseCase {
    users: Arc<dyn UserRepository>,
    image_store: Arc<dyn ImageStore>,
}

impl UploadAvatarUseCase {
    pub fn new(users: Arc<dyn UserRepository>, image_store: Arc<dyn ImageStore>) -> Self {
        Self { users, image_store }
    }

    #[tracing::instrument(skip(self, user, image), fields(user_id = user.id))]
    pub async fn execute(&self, user: &User, image: ImageUpload) -> Result<ImageInfo, AppError> {
        validate_image(&image)?;

        let uploaded = self.image_store.upload(image).await?;

        if let Err(e) = self.users.update_image(user.id, &uploaded.secure_url).await {
            // Nothing references the upload once the save fails.
            if let Err(delete_err) = self.image_store.delete(&uploaded.public_id).await {
                tracing::error!(public_id = %uploaded.public_id, "failed to delete orphaned image: {:?}", delete_err);
            }
            return Err(e.into());
        }

        Ok(uploaded.into())
    }
}
