use crate::domain::contacts::{Contact, ContactRepository, NewContact};
use crate::shared::error::{AppError, flatten_violations};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    #[validate(length(min = 3, max = 100, message = "First name must be 3-100 characters"))]
    pub first_name: String,
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

impl From<CreateContactRequest> for NewContact {
    fn from(req: CreateContactRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
        }
    }
}

/// Upper bound on a single bulk request; keeps one insert under the
/// Postgres bind-parameter limit.
pub const MAX_BULK_CONTACTS: usize = 1000;

pub struct CreateContactUseCase {
    repo: Arc<dyn ContactRepository>,
}

impl CreateContactUseCase {
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, user_id: i64, req: CreateContactRequest) -> Result<Contact, AppError> {
        Ok(self.repo.create(user_id, req.into()).await?)
    }

    /// Validate every element, then insert all of them in one transaction.
    #[tracing::instrument(skip(self, reqs), fields(count = reqs.len()))]
    pub async fn execute_many(
        &self,
        user_id: i64,
        reqs: Vec<CreateContactRequest>,
    ) -> Result<Vec<Contact>, AppError> {
        if reqs.is_empty() || reqs.len() > MAX_BULK_CONTACTS {
            return Err(AppError::BadRequest(format!(
                "At least one and at most {MAX_BULK_CONTACTS} contacts are required"
            )));
        }

        let violations: Vec<_> = reqs
            .iter()
            .enumerate()
            .filter_map(|(index, req)| {
                req.validate()
                    .err()
                    .map(|errors| flatten_violations(&index.to_string(), &errors))
            })
            .flatten()
            .collect();
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        let contacts = reqs.into_iter().map(NewContact::from).collect();
        Ok(self.repo.create_many(user_id, contacts).await?)
    }
}
