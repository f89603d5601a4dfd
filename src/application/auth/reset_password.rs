use crate::domain::password::{PasswordHashingService, hash_blocking, verify_blocking};
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(
        email(message = "Invalid email format"),
        length(min = 6, max = 100, message = "Email must be 6-100 characters")
    )]
    pub email: String,
    #[validate(length(min = 6, max = 100, message = "Password must be 6-100 characters"))]
    pub new_password: String,
    #[validate(
        length(min = 6, max = 100, message = "Password must be 6-100 characters"),
        must_match(other = "new_password", message = "Passwords do not match")
    )]
    pub repeat_new_password: String,
    #[validate(length(min = 6, max = 100, message = "Reset token must be 6-100 characters"))]
    pub reset_password_token: String,
}

#[derive(Debug, Serialize)]
pub struct ResetPasswordResponse {
    pub email: String,
    pub username: String,
}

const INVALID_TOKEN: &str = "Invalid reset password token";

pub struct ResetPasswordUseCase {
    users: Arc<dyn UserRepository>,
    password_service: Arc<dyn PasswordHashingService>,
}

impl ResetPasswordUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        password_service: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            users,
            password_service,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(&self, req: ResetPasswordRequest) -> Result<ResetPasswordResponse, AppError> {
        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid email".to_string()))?;

        let (Some(stored_hash), Some(expires_at)) = (
            user.password_reset_token_hash.clone(),
            user.password_reset_token_expires_at,
        ) else {
            return Err(AppError::Unauthorized(INVALID_TOKEN.to_string()));
        };

        let now = OffsetDateTime::now_utc();
        if expires_at <= now {
            self.users
                .clear_password_reset(user.id, &stored_hash)
                .await?;
            return Err(AppError::Unauthorized(
                "Reset password token expired".to_string(),
            ));
        }

        let valid = verify_blocking(
            self.password_service.clone(),
            req.reset_password_token,
            stored_hash.clone(),
        )
        .await?;
        if !valid {
            tracing::warn!(user_id = user.id, "reset token mismatch");
            return Err(AppError::Unauthorized(INVALID_TOKEN.to_string()));
        }

        let new_password_hash = hash_blocking(self.password_service.clone(), req.new_password).await?;

        // Loses to any concurrent reset that consumed the same token first.
        let swapped = self
            .users
            .reset_password(user.id, &stored_hash, new_password_hash, now)
            .await?;
        if !swapped {
            return Err(AppError::Unauthorized(INVALID_TOKEN.to_string()));
        }

        tracing::info!(user_id = user.id, "password reset");

        Ok(ResetPasswordResponse {
            email: user.email,
            username: user.username,
        })
    }
}
