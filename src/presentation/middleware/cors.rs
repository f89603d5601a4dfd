use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// CORS for the browser frontend. Session cookies need credentials, so the
/// origins must be listed explicitly; `frontend_origin` may hold several,
/// comma separated.
pub fn cors_layer(frontend_origin: &str) -> anyhow::Result<CorsLayer> {
    let origins: Vec<HeaderValue> = frontend_origin
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

    if origins.is_empty() {
        anyhow::bail!("FRONTEND_ORIGIN must name at least one origin");
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true))
}
