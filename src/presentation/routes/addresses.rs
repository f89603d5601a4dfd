use crate::infrastructure::state::AppState;
use crate::presentation::handlers::addresses;
use axum::{
    Router,
    routing::{get, post},
};

/// Address routes, nested under `/contacts/{contact_id}/addresses`.
/// Capture names must match the contact routes at the same segment.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(addresses::create_address).get(addresses::list_addresses),
        )
        .route(
            "/{address_id}",
            get(addresses::get_address)
                .patch(addresses::update_address)
                .delete(addresses::delete_address),
        )
}
