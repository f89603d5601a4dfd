use crate::domain::users::{Role, User};
use sqlx::FromRow;
use time::OffsetDateTime;

pub const USER_COLUMNS: &str = "id, email, username, password_hash, role, image, is_verified, \
    verified_at, email_verification_token, refresh_token_hash, password_reset_token_hash, \
    password_reset_token_expires_at, created_at, updated_at";

#[derive(Debug, Clone, FromRow)]
pub struct UserDbModel {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub image: Option<String>,
    pub is_verified: bool,
    pub verified_at: Option<OffsetDateTime>,
    pub email_verification_token: Option<String>,
    pub refresh_token_hash: Option<String>,
    pub password_reset_token_hash: Option<String>,
    pub password_reset_token_expires_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<UserDbModel> for User {
    type Error = anyhow::Error;

    fn try_from(model: UserDbModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            email: model.email,
            username: model.username,
            password_hash: model.password_hash,
            role: model.role.parse::<Role>()?,
            image: model.image,
            is_verified: model.is_verified,
            verified_at: model.verified_at,
            email_verification_token: model.email_verification_token,
            refresh_token_hash: model.refresh_token_hash,
            password_reset_token_hash: model.password_reset_token_hash,
            password_reset_token_expires_at: model.password_reset_token_expires_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
