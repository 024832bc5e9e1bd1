//! Cross-entity relationship and establishment-access checks.
//!
//! Two failure shapes, used consistently across services:
//! - linking a child record (leave, payroll) to an employee outside the
//!   caller's scope → [`ServiceError::CrossEstablishmentRelationship`]
//! - touching an existing resource outside the caller's scope →
//!   [`ServiceError::EstablishmentAccessDenied`]

use shared::ErrorCode;
use shared::models::Employee;
use sqlx::SqlitePool;

use super::{ServiceError, ServiceResult};
use crate::auth::ServiceContext;
use crate::db::repository;

/// Resolve an employee and verify it belongs to an establishment the caller
/// may access. Runs on child-record creation and on updates that re-link to
/// a different employee; `child_id` is absent for creates.
pub async fn employee_in_scope(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    employee_id: i64,
    child_type: &'static str,
    child_id: Option<i64>,
) -> ServiceResult<Employee> {
    let employee = repository::employee::find_by_id(pool, employee_id)
        .await?
        .ok_or_else(|| {
            ServiceError::domain_msg(
                ErrorCode::EmployeeNotFound,
                format!("Employee {employee_id} not found"),
            )
        })?;

    if !ctx.validate_access(employee.establishment_id) {
        tracing::warn!(
            user_id = ctx.user_id(),
            parent_type = "employee",
            parent_id = employee_id,
            parent_establishment_id = employee.establishment_id,
            child_type,
            caller_establishment_id = ?ctx.establishment_id(),
            "cross-establishment relationship rejected"
        );
        return Err(ServiceError::CrossEstablishmentRelationship {
            user_id: ctx.user_id(),
            parent_type: "employee",
            parent_id: employee_id,
            parent_establishment_id: employee.establishment_id,
            child_type,
            child_id,
            caller_establishment_id: ctx.establishment_id(),
        });
    }

    Ok(employee)
}

/// Verify the caller may touch an existing resource of
/// `resource_establishment_id`, or fail with the typed denial.
pub fn require_access(
    ctx: &ServiceContext,
    resource_type: &'static str,
    resource_id: i64,
    resource_establishment_id: i64,
) -> ServiceResult<()> {
    if ctx.validate_access(resource_establishment_id) {
        return Ok(());
    }
    tracing::warn!(
        user_id = ctx.user_id(),
        resource_type,
        resource_id,
        resource_establishment_id,
        caller_establishment_id = ?ctx.establishment_id(),
        "establishment access denied"
    );
    Err(ServiceError::EstablishmentAccessDenied {
        user_id: ctx.user_id(),
        resource_type,
        resource_id,
        resource_establishment_id,
        caller_establishment_id: ctx.establishment_id(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::services::test_support::{ctx_global, ctx_scoped, seed_employee, seed_establishment};

    #[tokio::test]
    async fn test_employee_in_scope_same_establishment() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;
        let emp = seed_employee(&pool, est, "ana@marazul.example").await;

        let found = employee_in_scope(&pool, &ctx_scoped(est), emp, "leave", None)
            .await
            .unwrap();
        assert_eq!(found.id, emp);
    }

    #[tokio::test]
    async fn test_employee_in_scope_global_caller() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;
        let emp = seed_employee(&pool, est, "ana@marazul.example").await;

        assert!(
            employee_in_scope(&pool, &ctx_global(), emp, "payroll", None)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_employee_in_scope_foreign_establishment() {
        let pool = test_pool().await;
        let est_a = seed_establishment(&pool, "Mar Azul").await;
        let est_b = seed_establishment(&pool, "Sierra Alta").await;
        let emp = seed_employee(&pool, est_a, "ana@marazul.example").await;

        let err = employee_in_scope(&pool, &ctx_scoped(est_b), emp, "leave", None)
            .await
            .unwrap_err();
        match err {
            ServiceError::CrossEstablishmentRelationship {
                parent_establishment_id,
                caller_establishment_id,
                child_id,
                ..
            } => {
                assert_eq!(parent_establishment_id, est_a);
                assert_eq!(caller_establishment_id, Some(est_b));
                assert_eq!(child_id, None);
            }
            other => panic!("expected cross-establishment error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_employee_in_scope_missing_employee() {
        let pool = test_pool().await;
        let err = employee_in_scope(&pool, &ctx_global(), 404, "leave", None)
            .await
            .unwrap_err();
        match err {
            ServiceError::Domain { code, .. } => {
                assert_eq!(code, ErrorCode::EmployeeNotFound)
            }
            other => panic!("expected not-found, got {other:?}"),
        }
    }

    #[test]
    fn test_require_access() {
        assert!(require_access(&ctx_global(), "leave", 1, 99).is_ok());
        assert!(require_access(&ctx_scoped(7), "leave", 1, 7).is_ok());
        assert!(matches!(
            require_access(&ctx_scoped(7), "leave", 1, 8),
            Err(ServiceError::EstablishmentAccessDenied { .. })
        ));
    }
}
