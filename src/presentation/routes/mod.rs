use axum::extract::DefaultBodyLimit;

pub mod addresses;
pub mod auth;
pub mod contacts;

/// Multipart bodies may carry a 5 MB image plus form framing.
pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(6 * 1024 * 1024)
}
