use anyhow::Result;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Unique token id, so two tokens minted in the same second still differ
    pub jti: String,
    /// Subject (user ID)
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(rename = "type")]
    pub kind: TokenKind,
}

impl Claims {
    pub fn new(user_id: i64, kind: TokenKind, ttl_seconds: i64) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            jti: Uuid::now_v7().to_string(),
            sub: user_id.to_string(),
            iat: now,
            exp: now + ttl_seconds,
            kind,
        }
    }

    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse::<i64>()
            .map_err(|e| anyhow::anyhow!("Invalid user ID in claims: {}", e))
    }
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs and checks the two kinds of session tokens. Access and refresh tokens
/// use separate secrets, so one can never pass for the other.
pub trait AuthService: Send + Sync {
    fn generate_access_token(&self, user_id: i64) -> Result<String>;
    fn generate_refresh_token(&self, user_id: i64) -> Result<String>;

    fn generate_token_pair(&self, user_id: i64) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.generate_access_token(user_id)?,
            refresh_token: self.generate_refresh_token(user_id)?,
        })
    }

    fn validate_access_token(&self, token: &str) -> Result<Claims>;
    fn validate_refresh_token(&self, token: &str) -> Result<Claims>;

    /// Lifetime of an access token in seconds
    fn access_token_ttl(&self) -> i64;
    /// Lifetime of a refresh token in seconds
    fn refresh_token_ttl(&self) -> i64;
}
