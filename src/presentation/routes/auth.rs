use crate::infrastructure::state::AppState;
use crate::presentation::handlers::auth;
use crate::presentation::routes::upload_body_limit;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Auth routes - registration, session lifecycle and password recovery
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/verify-email", post(auth::verify_email))
        .route("/login", post(auth::login))
        .route("/current", get(auth::current_user))
        .route("/logout", delete(auth::logout))
        .route("/refresh-token", post(auth::refresh_token))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
        .route(
            "/upload",
            post(auth::upload_avatar).layer(upload_body_limit()),
        )
}
