//! Unified error codes for the HMS backend
//!
//! Error codes are shared between the server and its clients and are
//! organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission / scope errors
//! - 3xxx: Establishment errors
//! - 4xxx: Booking / accommodation errors
//! - 5xxx: Billing errors
//! - 6xxx: Leave errors
//! - 7xxx: Payroll errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission / Scope ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,
    /// Caller's establishment scope excludes the resource's establishment
    EstablishmentAccessDenied = 2101,
    /// Child record references a parent outside the caller's establishment
    CrossEstablishmentRelationship = 2102,

    // ==================== 3xxx: Establishment ====================
    /// Establishment not found
    EstablishmentNotFound = 3001,
    /// Establishment name already exists
    EstablishmentNameExists = 3002,
    /// Establishment is inactive
    EstablishmentInactive = 3003,

    // ==================== 4xxx: Booking / Accommodation ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Booking check-out must be after check-in
    BookingInvalidDates = 4002,
    /// Accommodation not found
    AccommodationNotFound = 4101,
    /// Accommodation is inactive
    AccommodationInactive = 4102,

    // ==================== 5xxx: Billing ====================
    /// Invoice not found
    InvoiceNotFound = 5001,
    /// Invoice number already exists
    InvoiceNumberExists = 5002,
    /// Expense not found
    ExpenseNotFound = 5101,

    // ==================== 6xxx: Leave ====================
    /// Leave request not found
    LeaveNotFound = 6001,
    /// Leave overlaps an existing pending/approved leave
    LeaveOverlap = 6002,
    /// Insufficient annual leave balance
    InsufficientLeaveBalance = 6003,
    /// Invalid leave status transition
    LeaveInvalidTransition = 6004,
    /// Leave end date precedes start date
    LeaveInvalidDateRange = 6005,
    /// Rejection requires a reason
    LeaveReasonRequired = 6006,

    // ==================== 7xxx: Payroll ====================
    /// Payroll record not found
    PayrollNotFound = 7001,
    /// Payroll already exists for this employee and period
    PayrollPeriodExists = 7002,
    /// Invalid payroll status transition
    PayrollInvalidTransition = 7003,
    /// Invalid payroll period
    PayrollInvalidPeriod = 7004,

    // ==================== 8xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Employee email already exists
    EmployeeEmailExists = 8002,
    /// Employee is not active
    EmployeeInactive = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission / Scope
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::EstablishmentAccessDenied => {
                "Access denied for this establishment"
            }
            ErrorCode::CrossEstablishmentRelationship => {
                "Referenced record belongs to another establishment"
            }

            // Establishment
            ErrorCode::EstablishmentNotFound => "Establishment not found",
            ErrorCode::EstablishmentNameExists => "Establishment name already exists",
            ErrorCode::EstablishmentInactive => "Establishment is inactive",

            // Booking / Accommodation
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::BookingInvalidDates => "Check-out must be after check-in",
            ErrorCode::AccommodationNotFound => "Accommodation not found",
            ErrorCode::AccommodationInactive => "Accommodation is inactive",

            // Billing
            ErrorCode::InvoiceNotFound => "Invoice not found",
            ErrorCode::InvoiceNumberExists => "Invoice number already exists",
            ErrorCode::ExpenseNotFound => "Expense not found",

            // Leave
            ErrorCode::LeaveNotFound => "Leave request not found",
            ErrorCode::LeaveOverlap => "Leave overlaps an existing pending or approved leave",
            ErrorCode::InsufficientLeaveBalance => "Insufficient annual leave balance",
            ErrorCode::LeaveInvalidTransition => "Invalid leave status transition",
            ErrorCode::LeaveInvalidDateRange => "Leave end date precedes start date",
            ErrorCode::LeaveReasonRequired => "Rejection requires a reason",

            // Payroll
            ErrorCode::PayrollNotFound => "Payroll record not found",
            ErrorCode::PayrollPeriodExists => {
                "Payroll already exists for this employee and period"
            }
            ErrorCode::PayrollInvalidTransition => "Invalid payroll status transition",
            ErrorCode::PayrollInvalidPeriod => "Invalid payroll period",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeEmailExists => "Employee email already exists",
            ErrorCode::EmployeeInactive => "Employee is not active",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission / Scope
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),
            2101 => Ok(ErrorCode::EstablishmentAccessDenied),
            2102 => Ok(ErrorCode::CrossEstablishmentRelationship),

            // Establishment
            3001 => Ok(ErrorCode::EstablishmentNotFound),
            3002 => Ok(ErrorCode::EstablishmentNameExists),
            3003 => Ok(ErrorCode::EstablishmentInactive),

            // Booking / Accommodation
            4001 => Ok(ErrorCode::BookingNotFound),
            4002 => Ok(ErrorCode::BookingInvalidDates),
            4101 => Ok(ErrorCode::AccommodationNotFound),
            4102 => Ok(ErrorCode::AccommodationInactive),

            // Billing
            5001 => Ok(ErrorCode::InvoiceNotFound),
            5002 => Ok(ErrorCode::InvoiceNumberExists),
            5101 => Ok(ErrorCode::ExpenseNotFound),

            // Leave
            6001 => Ok(ErrorCode::LeaveNotFound),
            6002 => Ok(ErrorCode::LeaveOverlap),
            6003 => Ok(ErrorCode::InsufficientLeaveBalance),
            6004 => Ok(ErrorCode::LeaveInvalidTransition),
            6005 => Ok(ErrorCode::LeaveInvalidDateRange),
            6006 => Ok(ErrorCode::LeaveReasonRequired),

            // Payroll
            7001 => Ok(ErrorCode::PayrollNotFound),
            7002 => Ok(ErrorCode::PayrollPeriodExists),
            7003 => Ok(ErrorCode::PayrollInvalidTransition),
            7004 => Ok(ErrorCode::PayrollInvalidPeriod),

            // Employee
            8001 => Ok(ErrorCode::EmployeeNotFound),
            8002 => Ok(ErrorCode::EmployeeEmailExists),
            8003 => Ok(ErrorCode::EmployeeInactive),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
