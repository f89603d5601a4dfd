use anyhow::Result;
use std::sync::Arc;

/// Trait for password hashing and verification. Also used for password reset
/// tokens, which are stored with the same one-way hash.
pub trait PasswordHashingService: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String>;
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Run the hash on the blocking pool.
pub async fn hash_blocking(
    service: Arc<dyn PasswordHashingService>,
    password: String,
) -> Result<String> {
    tokio::task::spawn_blocking(move || service.hash_password(&password)).await?
}

pub async fn verify_blocking(
    service: Arc<dyn PasswordHashingService>,
    password: String,
    hash: String,
) -> Result<bool> {
    tokio::task::spawn_blocking(move || service.verify_password(&password, &hash)).await?
}
