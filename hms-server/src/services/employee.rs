//! Employee service.
//!
//! The employee's `establishment_id` is the pivot for every scope check in
//! the HR domain, so creating or moving an employee re-validates the target
//! establishment against the caller's scope.

use shared::models::{Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate};
use shared::{ErrorCode, PageQuery, Paginated};
use sqlx::SqlitePool;
use validator::Validate;

use super::{ServiceError, ServiceResult, access};
use crate::auth::ServiceContext;
use crate::db::repository::{self, RepoError};

pub async fn get(pool: &SqlitePool, ctx: &ServiceContext, id: i64) -> ServiceResult<Employee> {
    let employee = repository::employee::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    access::require_access(ctx, "employee", id, employee.establishment_id)?;
    Ok(employee)
}

pub async fn list(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    establishment_id: Option<i64>,
    status: Option<EmployeeStatus>,
    page: &PageQuery,
) -> ServiceResult<Paginated<Employee>> {
    let scope = ctx.scope_or(establishment_id);
    let (limit, offset) = page.limit_offset();
    let (rows, total) = repository::employee::find_page(pool, scope, status, limit, offset).await?;
    Ok(Paginated::new(rows, page.page.max(1), limit, total))
}

/// Create an employee under an establishment the caller may access.
pub async fn create(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    payload: EmployeeCreate,
) -> ServiceResult<Employee> {
    payload
        .validate()
        .map_err(|e| ServiceError::domain_msg(ErrorCode::ValidationFailed, e.to_string()))?;
    crate::utils::time::parse_date(&payload.hire_date)?;
    establishment_in_scope(pool, ctx, payload.establishment_id, None).await?;

    repository::employee::create(pool, &payload).await.map_err(|e| match e {
        RepoError::Duplicate(_) => ServiceError::domain_msg(
            ErrorCode::EmployeeEmailExists,
            format!("Employee email '{}' already exists", payload.email),
        ),
        other => other.into(),
    })
}

/// Update an employee. Moving them to another establishment re-validates
/// the target against the caller's scope.
pub async fn update(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    id: i64,
    payload: EmployeeUpdate,
) -> ServiceResult<Employee> {
    payload
        .validate()
        .map_err(|e| ServiceError::domain_msg(ErrorCode::ValidationFailed, e.to_string()))?;
    let existing = repository::employee::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    access::require_access(ctx, "employee", id, existing.establishment_id)?;

    if let Some(target) = payload.establishment_id {
        if target != existing.establishment_id {
            establishment_in_scope(pool, ctx, target, Some(id)).await?;
        }
    }

    repository::employee::update(pool, id, &payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => ServiceError::domain_msg(
                ErrorCode::EmployeeEmailExists,
                "Employee email already exists",
            ),
            other => other.into(),
        })?
        .ok_or_else(|| not_found(id))
}

pub async fn delete(pool: &SqlitePool, ctx: &ServiceContext, id: i64) -> ServiceResult<()> {
    let existing = repository::employee::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    access::require_access(ctx, "employee", id, existing.establishment_id)?;
    repository::employee::delete(pool, id).await?;
    Ok(())
}

/// Resolve an establishment and verify the caller may link an employee to
/// it. `child_id` is absent when the employee is being created.
async fn establishment_in_scope(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    establishment_id: i64,
    child_id: Option<i64>,
) -> ServiceResult<()> {
    let establishment = repository::establishment::find_by_id(pool, establishment_id)
        .await?
        .ok_or_else(|| {
            ServiceError::domain_msg(
                ErrorCode::EstablishmentNotFound,
                format!("Establishment {establishment_id} not found"),
            )
        })?;

    if !ctx.validate_access(establishment.id) {
        tracing::warn!(
            user_id = ctx.user_id(),
            parent_type = "establishment",
            parent_id = establishment_id,
            child_type = "employee",
            caller_establishment_id = ?ctx.establishment_id(),
            "cross-establishment relationship rejected"
        );
        return Err(ServiceError::CrossEstablishmentRelationship {
            user_id: ctx.user_id(),
            parent_type: "establishment",
            parent_id: establishment_id,
            parent_establishment_id: establishment.id,
            child_type: "employee",
            child_id,
            caller_establishment_id: ctx.establishment_id(),
        });
    }
    Ok(())
}

fn not_found(id: i64) -> ServiceError {
    ServiceError::domain_msg(ErrorCode::EmployeeNotFound, format!("Employee {id} not found"))
}
