use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// Fixed one-time token handed out outside production, so local flows can be
/// driven without reading mail.
pub const DEVELOPMENT_TOKEN: &str = "secret";

const ONE_TIME_TOKEN_BYTES: usize = 40;
const SALT_BYTES: usize = 16;

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    to_hex(&bytes)
}

/// Email verification and password reset tokens.
pub fn generate_one_time_token(production: bool) -> String {
    if production {
        random_hex(ONE_TIME_TOKEN_BYTES)
    } else {
        DEVELOPMENT_TOKEN.to_string()
    }
}

fn salted_digest(salt: &str, token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Hash a refresh token for storage as `salt$sha256(salt || token)`.
pub fn hash_token(token: &str) -> String {
    let salt = random_hex(SALT_BYTES);
    let digest = salted_digest(&salt, token);
    format!("{}${}", salt, digest)
}

/// Check a presented refresh token against a stored `salt$digest` value.
pub fn verify_token(token: &str, stored: &str) -> bool {
    let Some((salt, expected)) = stored.split_once('$') else {
        return false;
    };
    constant_time_eq(salted_digest(salt, token).as_bytes(), expected.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
