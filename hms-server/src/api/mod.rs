//! API route modules.
//!
//! # Structure
//!
//! - [`health`] - health check (public)
//! - [`establishments`] - establishment management
//! - [`employees`] - employee management
//! - [`leaves`] - leave requests, balances and summaries
//! - [`payrolls`] - payroll records and bulk generation
//! - [`analytics`] - read-side aggregates
//! - [`reports`] - composed report documents

pub mod analytics;
pub mod employees;
pub mod establishments;
pub mod health;
pub mod leaves;
pub mod payrolls;
pub mod reports;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// Assemble the full application router. Auth middleware wraps every
/// `/api/` route except the public ones it skips.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(establishments::router())
        .merge(employees::router())
        .merge(leaves::router())
        .merge(payrolls::router())
        .merge(analytics::router())
        .merge(reports::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
