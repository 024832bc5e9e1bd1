//! HTTP status mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Map this error code to an HTTP status code.
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,

            // 400 Bad Request
            ErrorCode::ValidationFailed
            | ErrorCode::InvalidRequest
            | ErrorCode::InvalidFormat
            | ErrorCode::RequiredField
            | ErrorCode::ValueOutOfRange
            | ErrorCode::BookingInvalidDates
            | ErrorCode::LeaveInvalidDateRange
            | ErrorCode::LeaveReasonRequired
            | ErrorCode::PayrollInvalidPeriod => StatusCode::BAD_REQUEST,

            // 401 Unauthorized
            ErrorCode::NotAuthenticated
            | ErrorCode::InvalidCredentials
            | ErrorCode::TokenExpired
            | ErrorCode::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            ErrorCode::PermissionDenied
            | ErrorCode::RoleRequired
            | ErrorCode::AdminRequired
            | ErrorCode::EstablishmentAccessDenied
            | ErrorCode::CrossEstablishmentRelationship => StatusCode::FORBIDDEN,

            // 404 Not Found
            ErrorCode::NotFound
            | ErrorCode::EstablishmentNotFound
            | ErrorCode::BookingNotFound
            | ErrorCode::AccommodationNotFound
            | ErrorCode::InvoiceNotFound
            | ErrorCode::ExpenseNotFound
            | ErrorCode::LeaveNotFound
            | ErrorCode::PayrollNotFound
            | ErrorCode::EmployeeNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            ErrorCode::AlreadyExists
            | ErrorCode::EstablishmentNameExists
            | ErrorCode::InvoiceNumberExists
            | ErrorCode::LeaveOverlap
            | ErrorCode::LeaveInvalidTransition
            | ErrorCode::PayrollPeriodExists
            | ErrorCode::PayrollInvalidTransition
            | ErrorCode::EmployeeEmailExists => StatusCode::CONFLICT,

            // 422 Unprocessable Entity (business rules)
            ErrorCode::EstablishmentInactive
            | ErrorCode::AccommodationInactive
            | ErrorCode::InsufficientLeaveBalance
            | ErrorCode::EmployeeInactive => StatusCode::UNPROCESSABLE_ENTITY,

            // 5xx
            ErrorCode::Unknown
            | ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::NetworkError => StatusCode::BAD_GATEWAY,
            ErrorCode::TimeoutError => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::EstablishmentAccessDenied.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::CrossEstablishmentRelationship.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::EmployeeNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ErrorCode::LeaveOverlap.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::PayrollPeriodExists.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::InsufficientLeaveBalance.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
