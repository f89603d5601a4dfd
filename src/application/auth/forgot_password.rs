use crate::application::auth::token_utils::generate_one_time_token;
use crate::domain::mailer::{Mailer, reset_password_email};
use crate::domain::password::{PasswordHashingService, hash_blocking};
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(
        email(message = "Invalid email format"),
        length(min = 6, max = 100, message = "Email must be 6-100 characters")
    )]
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResponse {
    pub email: String,
    /// Echoed only outside production; otherwise the token travels by mail alone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_reset_token: Option<String>,
}

pub struct ForgotPasswordUseCase {
    users: Arc<dyn UserRepository>,
    password_service: Arc<dyn PasswordHashingService>,
    mailer: Arc<dyn Mailer>,
    production: bool,
    frontend_origin: String,
    token_ttl: i64,
}

impl ForgotPasswordUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        password_service: Arc<dyn PasswordHashingService>,
        mailer: Arc<dyn Mailer>,
        production: bool,
        frontend_origin: String,
        token_ttl: i64,
    ) -> Self {
        Self {
            users,
            password_service,
            mailer,
            production,
            frontend_origin,
            token_ttl,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(
        &self,
        req: ForgotPasswordRequest,
    ) -> Result<ForgotPasswordResponse, AppError> {
        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid email".to_string()))?;

        if !user.is_verified {
            return Err(AppError::Unauthorized(
                "Please verify your email first".to_string(),
            ));
        }

        let token = generate_one_time_token(self.production);
        let token_hash = hash_blocking(self.password_service.clone(), token.clone()).await?;
        let expires_at = OffsetDateTime::now_utc() + Duration::seconds(self.token_ttl);

        self.users
            .store_password_reset(user.id, token_hash, expires_at)
            .await?;

        self.mailer
            .send(reset_password_email(
                &self.frontend_origin,
                &user.username,
                &user.email,
                &token,
            ))
            .await?;

        tracing::info!(user_id = user.id, "password reset issued");

        Ok(ForgotPasswordResponse {
            email: user.email,
            password_reset_token: (!self.production).then_some(token),
        })
    }
}
