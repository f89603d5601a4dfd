use crate::domain::auth::{AuthService, Claims, TokenKind};
use crate::infrastructure::config::JwtConfig;
use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: i64,
}

impl SigningKeys {
    fn new(secret: &str, ttl: i64, label: &str) -> Result<Self> {
        if secret.is_empty() {
            anyhow::bail!("{} token secret must not be empty", label);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }
}

/// JWT Authentication Service using HS256, one secret per token kind
pub struct JwtAuthService {
    access: SigningKeys,
    refresh: SigningKeys,
}

impl JwtAuthService {
    pub fn new(
        access_secret: &str,
        access_ttl: i64,
        refresh_secret: &str,
        refresh_ttl: i64,
    ) -> Result<Self> {
        Ok(Self {
            access: SigningKeys::new(access_secret, access_ttl, "Access")?,
            refresh: SigningKeys::new(refresh_secret, refresh_ttl, "Refresh")?,
        })
    }

    pub fn from_config(config: &JwtConfig) -> Result<Self> {
        Self::new(
            &config.access_token_secret,
            config.access_token_ttl,
            &config.refresh_token_secret,
            config.refresh_token_ttl,
        )
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    fn generate(&self, user_id: i64, kind: TokenKind) -> Result<String> {
        let keys = self.keys(kind);
        let claims = Claims::new(user_id, kind, keys.ttl);

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate token: {}", e))
    }

    fn validate(&self, token: &str, kind: TokenKind) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.keys(kind).decoding, &validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        if token_data.claims.kind != kind {
            anyhow::bail!("Invalid token: unexpected token type");
        }

        Ok(token_data.claims)
    }
}

impl AuthService for JwtAuthService {
    fn generate_access_token(&self, user_id: i64) -> Result<String> {
        self.generate(user_id, TokenKind::Access)
    }

    fn generate_refresh_token(&self, user_id: i64) -> Result<String> {
        self.generate(user_id, TokenKind::Refresh)
    }

    fn validate_access_token(&self, token: &str) -> Result<Claims> {
        self.validate(token, TokenKind::Access)
    }

    fn validate_refresh_token(&self, token: &str) -> Result<Claims> {
        self.validate(token, TokenKind::Refresh)
    }

    fn access_token_ttl(&self) -> i64 {
        self.access.ttl
    }

    fn refresh_token_ttl(&self) -> i64 {
        self.refresh.ttl
    }
}
