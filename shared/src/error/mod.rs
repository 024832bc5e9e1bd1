//! Unified error system for the HMS backend
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission / scope errors
//! - 3xxx: Establishment errors
//! - 4xxx: Booking errors
//! - 5xxx: Billing errors
//! - 6xxx: Leave errors
//! - 7xxx: Payroll errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::LeaveNotFound);
//!
//! // Create an error with custom message and audit details
//! let err = AppError::with_message(ErrorCode::EstablishmentAccessDenied, "Scope mismatch")
//!     .with_detail("user_id", 42)
//!     .with_detail("resource_type", "payroll");
//!
//! // Convert to API response
//! let response = ApiResponse::<()>::error(&err);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
