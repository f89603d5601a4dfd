use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// The very first account becomes the administrator.
    pub fn for_new_account(existing_accounts: i64) -> Self {
        if existing_accounts == 0 {
            Role::Admin
        } else {
            Role::User
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(anyhow::anyhow!("Unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
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

impl User {
    pub fn has_active_session(&self) -> bool {
        self.refresh_token_hash
            .as_deref()
            .is_some_and(|hash| !hash.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub email_verification_token: String,
}

/// Raised by a repository when an insert hits the email or username unique key.
#[derive(Debug, Error)]
#[error("{field} already exists")]
pub struct DuplicateUser {
    pub field: &'static str,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, anyhow::Error>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, anyhow::Error>;
    async fn count_all(&self) -> Result<i64, anyhow::Error>;
    async fn count_by_username(&self, username: &str) -> Result<i64, anyhow::Error>;

    /// Mark the email as verified and drop the verification token.
    async fn mark_verified(
        &self,
        id: i64,
        verified_at: OffsetDateTime,
    ) -> Result<User, anyhow::Error>;

    /// Replace the stored refresh-token hash; `None` ends the session.
    async fn update_refresh_token_hash(
        &self,
        id: i64,
        token_hash: Option<String>,
    ) -> Result<(), anyhow::Error>;

    async fn store_password_reset(
        &self,
        id: i64,
        token_hash: String,
        expires_at: OffsetDateTime,
    ) -> Result<(), anyhow::Error>;

    /// Clear the reset fields only while `expected_reset_hash` is still stored,
    /// so a reset issued in the meantime survives. Returns whether a row changed.
    async fn clear_password_reset(
        &self,
        id: i64,
        expected_reset_hash: &str,
    ) -> Result<bool, anyhow::Error>;

    /// Swap in a new password hash only while `expected_reset_hash` is still the
    /// stored reset hash and unexpired at `now`. Clears the reset fields and the
    /// refresh-token hash. Returns `false` when the condition no longer holds.
    async fn reset_password(
        &self,
        id: i64,
        expected_reset_hash: &str,
        new_password_hash: String,
        now: OffsetDateTime,
    ) -> Result<bool, anyhow::Error>;

    async fn update_image(&self, id: i64, image_url: &str) -> Result<User, anyhow::Error>;
    async fn delete(&self, id: i64) -> Result<bool, anyhow::Error>;

    /// Cheap connectivity probe used by the health endpoint.
    async fn ping(&self) -> Result<(), anyhow::Error>;
}
