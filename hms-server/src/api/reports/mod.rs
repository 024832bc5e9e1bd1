//! Report API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/financial", get(handler::financial))
        .route("/hr", get(handler::hr))
        .route("/occupancy", get(handler::occupancy))
        .route("/comparison", get(handler::comparison))
}
