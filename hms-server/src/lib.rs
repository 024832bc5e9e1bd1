//! HMS Server - multi-establishment hotel management backend
//!
//! # Architecture
//!
//! - **Auth** (`auth`): JWT bearer authentication and the establishment-scoped
//!   [`ServiceContext`] threaded through every service call
//! - **Database** (`db`): embedded SQLite (WAL) with migration-managed schema
//!   and free-function repositories
//! - **Services** (`services`): domain rules for establishments, employees,
//!   leaves and payrolls, plus read-side analytics and report assembly
//! - **HTTP API** (`api`): per-resource axum routers under `/api/...`
//!
//! # Module structure
//!
//! ```text
//! hms-server/src/
//! ├── core/          # config, state, server bootstrap
//! ├── auth/          # JWT, service context, middleware
//! ├── db/            # pool, migrations, repositories
//! ├── services/      # domain logic and aggregation
//! ├── api/           # HTTP routes and handlers
//! ├── cache.rs       # TTL listing cache
//! └── utils/         # logging, time helpers
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use auth::{CurrentUser, JwtService, ServiceContext};
pub use core::{Config, Server, ServerState};

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// Security event logging with structured fields (auth failures, scope
/// denials). Routed to the `security` target so it can be filtered
/// independently of application logs.
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::warn!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
