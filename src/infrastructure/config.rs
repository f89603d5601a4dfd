use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(anyhow::anyhow!("Unknown APP_ENV: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_token_secret: String,
    pub access_token_ttl: i64,
    pub refresh_token_secret: String,
    pub refresh_token_ttl: i64,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

#[derive(Debug, Clone)]
pub enum MailTransport {
    Log,
    Brevo { api_key: String },
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub transport: MailTransport,
    pub sender_email: String,
    pub sender_name: String,
}

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub environment: Environment,
    pub frontend_origin: String,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cookie_secret: String,
    /// Seconds a password reset token stays usable
    pub password_reset_token_ttl: i64,
    pub mail: MailConfig,
    pub cloudinary: Option<CloudinaryConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| get(key).with_context(|| format!("{} must be set", key));

        let transport = match get("MAIL_TRANSPORT").as_deref().unwrap_or("log") {
            "log" => MailTransport::Log,
            "brevo" => MailTransport::Brevo {
                api_key: required("BREVO_API_KEY")?,
            },
            other => anyhow::bail!("Unknown MAIL_TRANSPORT: {}", other),
        };

        let cloudinary = match (
            get("CLOUDINARY_CLOUD_NAME"),
            get("CLOUDINARY_API_KEY"),
            get("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryConfig {
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => None,
        };

        Ok(Self {
            port: parse_or(&get, "PORT", 3000)?,
            environment: get("APP_ENV")
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or(Environment::Development),
            frontend_origin: get("FRONTEND_ORIGIN")
                .unwrap_or_else(|| "http://localhost:5173".to_string()),
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 20)?,
                min_connections: parse_or(&get, "DB_MIN_CONNECTIONS", 5)?,
                acquire_timeout: Duration::from_secs(parse_or(&get, "DB_ACQUIRE_TIMEOUT_SECS", 3)?),
                idle_timeout: Duration::from_secs(parse_or(&get, "DB_IDLE_TIMEOUT_SECS", 600)?),
            },
            jwt: JwtConfig {
                access_token_secret: required("JWT_ACCESS_TOKEN_SECRET")?,
                access_token_ttl: parse_or(&get, "JWT_ACCESS_TOKEN_TTL", 120)?,
                refresh_token_secret: required("JWT_REFRESH_TOKEN_SECRET")?,
                refresh_token_ttl: parse_or(&get, "JWT_REFRESH_TOKEN_TTL", 86_400)?,
            },
            cookie_secret: required("COOKIE_SECRET")?,
            password_reset_token_ttl: parse_or(&get, "PASSWORD_RESET_TOKEN_TTL", 300)?,
            mail: MailConfig {
                transport,
                sender_email: get("MAIL_SENDER_EMAIL")
                    .unwrap_or_else(|| "do-not-reply@example.com".to_string()),
                sender_name: get("MAIL_SENDER_NAME").unwrap_or_else(|| "Address Book".to_string()),
            },
            cloudinary,
        })
    }
}

fn parse_or<T, F>(get: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}: {}", key, e)),
        None => Ok(default),
    }
}
