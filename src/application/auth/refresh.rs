use crate::application::auth::token_utils::verify_token;
use crate::domain::auth::AuthService;
use crate::domain::users::User;
use crate::shared::error::AppError;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues a new access token for a refresh token that the guard has already
/// checked for signature and expiry. The refresh token itself is not rotated.
pub struct RefreshTokenUseCase {
    auth_service: Arc<dyn AuthService>,
}

impl RefreshTokenUseCase {
    pub fn new(auth_service: Arc<dyn AuthService>) -> Self {
        Self { auth_service }
    }

    #[tracing::instrument(skip(self, user, refresh_token), fields(user_id = user.id))]
    pub fn execute(&self, user: &User, refresh_token: String) -> Result<RefreshResponse, AppError> {
        let stored = user
            .refresh_token_hash
            .as_deref()
            .filter(|hash| !hash.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

        if !verify_token(&refresh_token, stored) {
            tracing::warn!("superseded or unknown refresh token presented");
            return Err(AppError::Unauthorized("Invalid refresh token".to_string()));
        }

        let access_token = self.auth_service.generate_access_token(user.id)?;

        Ok(RefreshResponse {
            access_token,
            refresh_token,
        })
    }
}
