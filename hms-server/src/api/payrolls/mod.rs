//! Payroll API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_manager;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payrolls", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/summary", get(handler::summary))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/generate", post(handler::generate))
        .route("/{id}/approve", post(handler::approve))
        .route("/{id}/pay", post(handler::mark_paid))
        .route("/{id}", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_manager));

    read_routes.merge(manage_routes)
}
