//! Shared domain models and error types for the HMS backend.
//!
//! This crate is consumed by the server (with the `db` feature, which adds
//! `sqlx::FromRow`/`sqlx::Type` derives to the models) and by any tooling
//! that only needs the wire types.

pub mod error;
pub mod models;
pub mod pagination;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use pagination::{PageQuery, Paginated, Pagination};
