//! Domain services.
//!
//! Every operation takes the caller's [`ServiceContext`] as an explicit
//! parameter and re-checks establishment access against fresh storage state
//! before mutating anything. Services own the domain rules; repositories
//! only move rows.

pub mod access;
pub mod analytics;
pub mod employee;
pub mod establishment;
pub mod leave;
pub mod payroll;
pub mod report;

use serde_json::Value;
use shared::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::repository::RepoError;

/// Service-level error carrying enough context for audit logging.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage-layer failure that no domain rule accounts for
    #[error("{0}")]
    Repo(#[from] RepoError),

    /// The caller's establishment scope excludes the resource's actual
    /// establishment
    #[error("access denied for {resource_type} {resource_id}")]
    EstablishmentAccessDenied {
        user_id: i64,
        resource_type: &'static str,
        resource_id: i64,
        resource_establishment_id: i64,
        caller_establishment_id: Option<i64>,
    },

    /// A child record would reference a parent outside the caller's
    /// establishment scope
    #[error("{parent_type} {parent_id} belongs to another establishment")]
    CrossEstablishmentRelationship {
        user_id: i64,
        parent_type: &'static str,
        parent_id: i64,
        parent_establishment_id: i64,
        child_type: &'static str,
        /// Absent when the child is being created
        child_id: Option<i64>,
        caller_establishment_id: Option<i64>,
    },

    /// Domain rule violation or typed not-found
    #[error("{message}")]
    Domain { code: ErrorCode, message: String },
}

impl ServiceError {
    /// Domain error with the code's default message.
    pub fn domain(code: ErrorCode) -> Self {
        Self::Domain {
            message: code.message().to_string(),
            code,
        }
    }

    /// Domain error with a custom message.
    pub fn domain_msg(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Domain {
            code,
            message: message.into(),
        }
    }
}

// Payload/date validation helpers produce AppError; fold them into the
// domain variant so `?` works across the boundary.
impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::Domain {
            code: err.code,
            message: err.message,
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        fn opt(v: Option<i64>) -> Value {
            v.map(Value::from).unwrap_or(Value::Null)
        }

        match err {
            ServiceError::Repo(RepoError::NotFound(msg)) => {
                AppError::with_message(ErrorCode::NotFound, msg)
            }
            ServiceError::Repo(RepoError::Duplicate(msg)) => {
                AppError::with_message(ErrorCode::AlreadyExists, msg)
            }
            ServiceError::Repo(RepoError::Database(msg)) => AppError::database(msg),
            ServiceError::EstablishmentAccessDenied {
                user_id,
                resource_type,
                resource_id,
                resource_establishment_id,
                caller_establishment_id,
            } => AppError::new(ErrorCode::EstablishmentAccessDenied)
                .with_detail("user_id", user_id)
                .with_detail("resource_type", resource_type)
                .with_detail("resource_id", resource_id)
                .with_detail("resource_establishment_id", resource_establishment_id)
                .with_detail("caller_establishment_id", opt(caller_establishment_id)),
            ServiceError::CrossEstablishmentRelationship {
                user_id,
                parent_type,
                parent_id,
                parent_establishment_id,
                child_type,
                child_id,
                caller_establishment_id,
            } => AppError::new(ErrorCode::CrossEstablishmentRelationship)
                .with_detail("user_id", user_id)
                .with_detail("parent_type", parent_type)
                .with_detail("parent_id", parent_id)
                .with_detail("parent_establishment_id", parent_establishment_id)
                .with_detail("child_type", child_type)
                .with_detail("child_id", opt(child_id))
                .with_detail("caller_establishment_id", opt(caller_establishment_id)),
            ServiceError::Domain { code, message } => AppError::with_message(code, message),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_maps_with_audit_details() {
        let err = ServiceError::EstablishmentAccessDenied {
            user_id: 42,
            resource_type: "leave",
            resource_id: 9,
            resource_establishment_id: 1,
            caller_establishment_id: Some(2),
        };
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::EstablishmentAccessDenied);
        let details = app.details.unwrap();
        assert_eq!(details.get("user_id").unwrap(), 42);
        assert_eq!(details.get("resource_type").unwrap(), "leave");
        assert_eq!(details.get("resource_establishment_id").unwrap(), 1);
        assert_eq!(details.get("caller_establishment_id").unwrap(), 2);
    }

    #[test]
    fn test_cross_establishment_maps_new_child_as_null() {
        let err = ServiceError::CrossEstablishmentRelationship {
            user_id: 1,
            parent_type: "employee",
            parent_id: 5,
            parent_establishment_id: 10,
            child_type: "payroll",
            child_id: None,
            caller_establishment_id: Some(20),
        };
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::CrossEstablishmentRelationship);
        let details = app.details.unwrap();
        assert!(details.get("child_id").unwrap().is_null());
        assert_eq!(details.get("parent_establishment_id").unwrap(), 10);
    }

    #[test]
    fn test_repo_errors_map_to_codes() {
        let app: AppError = ServiceError::Repo(RepoError::Duplicate("x".into())).into();
        assert_eq!(app.code, ErrorCode::AlreadyExists);
        let app: AppError = ServiceError::Repo(RepoError::Database("y".into())).into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
    }
}
