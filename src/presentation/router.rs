use crate::infrastructure::state::AppState;
use crate::presentation::handlers;
use crate::presentation::middleware::cors::cors_layer;
use crate::presentation::routes;
use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn app(state: AppState) -> anyhow::Result<Router> {
    let cors = cors_layer(&state.config.frontend_origin)?;

    let api = Router::new()
        .nest("/auth", routes::auth::routes())
        .nest("/contacts/{contact_id}/addresses", routes::addresses::routes())
        .nest("/contacts", routes::contacts::routes());

    Ok(Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", api)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
