use crate::domain::users::{Role, UserRepository};
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    #[validate(
        email(message = "Invalid email format"),
        length(min = 6, max = 100, message = "Email must be 6-100 characters")
    )]
    pub email: String,
    #[validate(length(min = 6, max = 100, message = "Verification token must be 6-100 characters"))]
    pub email_verification_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailResponse {
    pub email: String,
    pub role: Role,
    pub is_verified: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub verified_time: Option<OffsetDateTime>,
}

pub struct VerifyEmailUseCase {
    users: Arc<dyn UserRepository>,
}

impl VerifyEmailUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(&self, req: VerifyEmailRequest) -> Result<VerifyEmailResponse, AppError> {
        let invalid = || AppError::BadRequest("Invalid email or verification token".to_string());

        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or_else(invalid)?;

        if user.email_verification_token.as_deref() != Some(req.email_verification_token.as_str()) {
            tracing::warn!(user_id = user.id, "email verification token mismatch");
            return Err(invalid());
        }

        let user = self
            .users
            .mark_verified(user.id, OffsetDateTime::now_utc())
            .await?;

        Ok(VerifyEmailResponse {
            email: user.email,
            role: user.role,
            is_verified: user.is_verified,
            verified_time: user.verified_at,
        })
    }
}
