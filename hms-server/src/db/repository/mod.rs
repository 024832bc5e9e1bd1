//! Repository module.
//!
//! Free async functions over `&SqlitePool`. Establishment-scope filters
//! arrive as `Option<i64>`: `None` means unrestricted, `Some(id)` restricts
//! to one establishment. Repositories never decide scope — that is the
//! service layer's job.

pub mod analytics;
pub mod establishment;
pub mod employee;
pub mod leave;
pub mod payroll;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("duplicate: {0}")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".into()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
