//! Leave API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_manager;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/leaves", routes())
}

fn routes() -> Router<ServerState> {
    // Staff can request and cancel their establishment's leaves; the
    // service layer enforces the establishment scope.
    let base_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/summary", get(handler::summary))
        .route("/balance/{employee_id}", get(handler::balance))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/cancel", post(handler::cancel));

    // Approval decisions and deletion are manager-tier
    let manage_routes = Router::new()
        .route("/{id}/approve", post(handler::approve))
        .route("/{id}/reject", post(handler::reject))
        .route("/{id}", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_manager));

    base_routes.merge(manage_routes)
}
