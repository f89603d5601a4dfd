use crate::application::contacts::get::CONTACT_NOT_FOUND;
use crate::domain::contacts::ContactRepository;
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct DeleteContactUseCase {
    repo: Arc<dyn ContactRepository>,
}

impl DeleteContactUseCase {
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        if !self.repo.delete(user_id, id).await? {
            return Err(AppError::NotFound(CONTACT_NOT_FOUND.to_string()));
        }
        Ok(true)
    }
}
