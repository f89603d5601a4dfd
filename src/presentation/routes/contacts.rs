use crate::infrastructure::state::AppState;
use crate::presentation::handlers::contacts;
use crate::presentation::routes::upload_body_limit;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Contact routes - CRUD over the caller's contacts
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(contacts::create_contact).get(contacts::list_contacts),
        )
        .route("/bulk", post(contacts::create_contacts_bulk))
        .route(
            "/{contact_id}",
            get(contacts::get_contact)
                .patch(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        .route(
            "/{contact_id}/upload",
            put(contacts::upload_contact_image).layer(upload_body_limit()),
        )
}
