use crate::domain::contacts::{Contact, ContactRepository};
use crate::shared::error::AppError;
use std::sync::Arc;

pub const CONTACT_NOT_FOUND: &str = "Contact not found";

pub struct GetContactUseCase {
    repo: Arc<dyn ContactRepository>,
}

impl GetContactUseCase {
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }

    /// Only the owning user can see a contact; anyone else gets 404.
    pub async fn execute(&self, user_id: i64, id: i64) -> Result<Contact, AppError> {
        self.repo
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(CONTACT_NOT_FOUND.to_string()))
    }
}
