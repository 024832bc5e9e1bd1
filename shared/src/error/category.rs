//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission / scope errors
/// - 3xxx: Establishment errors
/// - 4xxx: Booking errors
/// - 5xxx: Billing errors
/// - 6xxx: Leave errors
/// - 7xxx: Payroll errors
/// - 8xxx: Employee errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission / scope errors (2xxx)
    Permission,
    /// Establishment errors (3xxx)
    Establishment,
    /// Booking errors (4xxx)
    Booking,
    /// Billing errors (5xxx)
    Billing,
    /// Leave errors (6xxx)
    Leave,
    /// Payroll errors (7xxx)
    Payroll,
    /// Employee errors (8xxx)
    Employee,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Establishment,
            4000..5000 => Self::Booking,
            5000..6000 => Self::Billing,
            6000..7000 => Self::Leave,
            7000..8000 => Self::Payroll,
            8000..9000 => Self::Employee,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Establishment => "establishment",
            Self::Booking => "booking",
            Self::Billing => "billing",
            Self::Leave => "leave",
            Self::Payroll => "payroll",
            Self::Employee => "employee",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2101), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Establishment);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Booking);
        assert_eq!(ErrorCategory::from_code(5101), ErrorCategory::Billing);
        assert_eq!(ErrorCategory::from_code(6002), ErrorCategory::Leave);
        assert_eq!(ErrorCategory::from_code(7002), ErrorCategory::Payroll);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::Employee);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::NotFound.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::EstablishmentAccessDenied.category(),
            ErrorCategory::Permission
        );
        assert_eq!(
            ErrorCode::CrossEstablishmentRelationship.category(),
            ErrorCategory::Permission
        );
        assert_eq!(ErrorCode::LeaveOverlap.category(), ErrorCategory::Leave);
        assert_eq!(
            ErrorCode::PayrollPeriodExists.category(),
            ErrorCategory::Payroll
        );
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }
}
