use crate::application::contacts::get::CONTACT_NOT_FOUND;
use crate::domain::contacts::{Contact, ContactChanges, ContactRepository};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    #[validate(length(min = 3, max = 100, message = "First name must be 3-100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 3, max = 100, message = "Last name must be 3-100 characters"))]
    pub last_name: Option<String>,
    #[validate(
        email(message = "Invalid email format"),
        length(min = 6, max = 100, message = "Email must be 6-100 characters")
    )]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 20, message = "Phone must be 6-20 characters"))]
    pub phone: Option<String>,
}

pub struct UpdateContactUseCase {
    repo: Arc<dyn ContactRepository>,
}

impl UpdateContactUseCase {
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(
        &self,
        user_id: i64,
        id: i64,
        req: UpdateContactRequest,
    ) -> Result<Contact, AppError> {
        let changes = ContactChanges {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
        };

        self.repo
            .update(user_id, id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound(CONTACT_NOT_FOUND.to_string()))
    }
}
