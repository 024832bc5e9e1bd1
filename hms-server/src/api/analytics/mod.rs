//! Analytics API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/analytics", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/revenue", get(handler::revenue))
        .route("/expenses", get(handler::expenses))
        .route("/occupancy", get(handler::occupancy))
        .route("/financial-summary", get(handler::financial_summary))
        .route("/revenue-by-period", get(handler::revenue_by_period))
        .route("/expenses-by-category", get(handler::expenses_by_category))
}
