use crate::domain::auth::Claims;
use crate::domain::users::User;
use crate::infrastructure::state::AppState;
use crate::presentation::cookies::{self, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::shared::error::AppError;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::SignedCookieJar;

const INVALID_ACCESS_TOKEN: &str = "Invalid access token";
const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";

/// User resolved from a valid access token.
pub struct AuthUser {
    pub user: User,
    pub claims: Claims,
}

/// User resolved from a valid refresh token, together with the raw token so
/// it can be checked against the stored hash.
pub struct RefreshUser {
    pub user: User,
    pub claims: Claims,
    pub refresh_token: String,
}

/// Signed cookie first, then `Authorization: Bearer`.
async fn extract_token(
    parts: &mut Parts,
    state: &AppState,
    cookie_name: &str,
) -> Option<String> {
    let jar = match SignedCookieJar::from_request_parts(parts, state).await {
        Ok(jar) => jar,
        Err(never) => match never {},
    };
    if let Some(token) = cookies::read(&jar, cookie_name) {
        return Some(token);
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

async fn resolve_user(state: &AppState, claims: &Claims, message: &str) -> Result<User, AppError> {
    let user_id = claims
        .user_id()
        .map_err(|_| AppError::Unauthorized(message.to_string()))?;

    state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized(message.to_string()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts, state, ACCESS_TOKEN_COOKIE)
            .await
            .ok_or_else(|| AppError::Unauthorized(INVALID_ACCESS_TOKEN.to_string()))?;

        let claims = state.auth_service.validate_access_token(&token).map_err(|e| {
            tracing::warn!("access token rejected: {}", e);
            AppError::Unauthorized(INVALID_ACCESS_TOKEN.to_string())
        })?;

        let user = resolve_user(state, &claims, INVALID_ACCESS_TOKEN).await?;

        Ok(AuthUser { user, claims })
    }
}

impl FromRequestParts<AppState> for RefreshUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let refresh_token = extract_token(parts, state, REFRESH_TOKEN_COOKIE)
            .await
            .ok_or_else(|| AppError::Unauthorized("Refresh token not found".to_string()))?;

        let claims = state
            .auth_service
            .validate_refresh_token(&refresh_token)
            .map_err(|e| {
                tracing::warn!("refresh token rejected: {}", e);
                AppError::Unauthorized(INVALID_REFRESH_TOKEN.to_string())
            })?;

        let user = resolve_user(state, &claims, INVALID_REFRESH_TOKEN).await?;
        if !user.has_active_session() {
            return Err(AppError::Unauthorized(INVALID_REFRESH_TOKEN.to_string()));
        }

        Ok(RefreshUser {
            user,
            claims,
            refresh_token,
        })
    }
}
