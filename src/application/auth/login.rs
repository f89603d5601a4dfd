use crate::application::auth::token_utils::hash_token;
use crate::domain::auth::AuthService;
use crate::domain::password::{PasswordHashingService, verify_blocking};
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        email(message = "Invalid email format"),
        length(min = 6, max = 100, message = "Email must be 6-100 characters")
    )]
    pub email: String,

    #[validate(length(min = 6, max = 100, message = "Password must be 6-100 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub email: String,
    pub username: String,
    pub access_token: String,
    pub refresh_token: String,
}

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct LoginUseCase {
    users: Arc<dyn UserRepository>,
    auth_service: Arc<dyn AuthService>,
    password_service: Arc<dyn PasswordHashingService>,
}

impl LoginUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        auth_service: Arc<dyn AuthService>,
        password_service: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            users,
            auth_service,
            password_service,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| AppError::BadRequest(INVALID_CREDENTIALS.to_string()))?;

        if !user.is_verified {
            return Err(AppError::Unauthorized(
                "Please verify your email first".to_string(),
            ));
        }

        let valid_password = verify_blocking(
            self.password_service.clone(),
            req.password,
            user.password_hash.clone(),
        )
        .await?;

        if !valid_password {
            tracing::warn!(user_id = user.id, "login rejected");
            return Err(AppError::BadRequest(INVALID_CREDENTIALS.to_string()));
        }

        let tokens = self.auth_service.generate_token_pair(user.id)?;

        // Replaces any earlier session: only the latest refresh token verifies.
        self.users
            .update_refresh_token_hash(user.id, Some(hash_token(&tokens.refresh_token)))
            .await?;

        tracing::info!(user_id = user.id, "user logged in");

        Ok(LoginResponse {
            email: user.email,
            username: user.username,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }
}
