//! Leave service.
//!
//! Status machine: `PENDING -> APPROVED | REJECTED | CANCELLED`, plus
//! `APPROVED -> CANCELLED`. Every mutation refetches the leave and
//! re-validates establishment access through its employee before touching
//! anything.

use chrono::Datelike;
use shared::models::{Leave, LeaveBalance, LeaveCreate, LeaveFilter, LeaveStatus, LeaveSummary, LeaveType};
use shared::{ErrorCode, PageQuery, Paginated};
use sqlx::SqlitePool;

use super::{ServiceError, ServiceResult, access};
use crate::auth::ServiceContext;
use crate::db::repository::{self, RepoError};
use crate::utils::time;

/// Fixed annual leave allotment, in days per calendar year.
pub const ANNUAL_ALLOTMENT_DAYS: i64 = 22;

/// Create a PENDING leave request.
///
/// Validates the employee relationship, computes the inclusive day count,
/// checks the annual balance for ANNUAL requests, and relies on the
/// repository's transactional overlap check for conflicting requests.
pub async fn create(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    payload: LeaveCreate,
) -> ServiceResult<Leave> {
    let employee = access::employee_in_scope(pool, ctx, payload.employee_id, "leave", None).await?;

    let start = time::parse_date(&payload.start_date)?;
    let end = time::parse_date(&payload.end_date)?;
    if end < start {
        return Err(ServiceError::domain_msg(
            ErrorCode::LeaveInvalidDateRange,
            format!("End date {} precedes start date {}", payload.end_date, payload.start_date),
        ));
    }
    let days = time::inclusive_days(start, end);

    if payload.leave_type == LeaveType::Annual {
        let balance = balance_unchecked(pool, employee.id, start.year()).await?;
        if days > balance.annual_remaining {
            return Err(ServiceError::domain_msg(
                ErrorCode::InsufficientLeaveBalance,
                format!(
                    "Requested {days} annual days but only {} remain for {}",
                    balance.annual_remaining,
                    start.year()
                ),
            ));
        }
    }

    repository::leave::create(pool, &payload, days)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(msg) => ServiceError::domain_msg(ErrorCode::LeaveOverlap, msg),
            other => other.into(),
        })
}

pub async fn get(pool: &SqlitePool, ctx: &ServiceContext, id: i64) -> ServiceResult<Leave> {
    let (leave, _) = load_with_access(pool, ctx, id).await?;
    Ok(leave)
}

pub async fn list(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    filter: &LeaveFilter,
    page: &PageQuery,
) -> ServiceResult<Paginated<Leave>> {
    let scope = ctx.scope_or(filter.establishment_id);
    let (limit, offset) = page.limit_offset();
    let (rows, total) =
        repository::leave::find_page(pool, scope, filter.employee_id, filter.status, limit, offset)
            .await?;
    Ok(Paginated::new(rows, page.page.max(1), limit, total))
}

/// Approve a pending leave, stamping the approver.
pub async fn approve(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    id: i64,
    approved_by: i64,
) -> ServiceResult<Leave> {
    let (leave, _) = load_with_access(pool, ctx, id).await?;
    guard_transition(leave.status, LeaveStatus::Approved)?;
    Ok(repository::leave::set_status(pool, id, LeaveStatus::Approved, Some(approved_by), None).await?)
}

/// Reject a pending leave. A non-empty reason is required and stored.
pub async fn reject(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    id: i64,
    approved_by: i64,
    reason: &str,
) -> ServiceResult<Leave> {
    if reason.trim().is_empty() {
        return Err(ServiceError::domain(ErrorCode::LeaveReasonRequired));
    }
    let (leave, _) = load_with_access(pool, ctx, id).await?;
    guard_transition(leave.status, LeaveStatus::Rejected)?;
    Ok(repository::leave::set_status(
        pool,
        id,
        LeaveStatus::Rejected,
        Some(approved_by),
        Some(reason),
    )
    .await?)
}

/// Cancel a pending or approved leave.
pub async fn cancel(pool: &SqlitePool, ctx: &ServiceContext, id: i64) -> ServiceResult<Leave> {
    let (leave, _) = load_with_access(pool, ctx, id).await?;
    guard_transition(leave.status, LeaveStatus::Cancelled)?;
    Ok(repository::leave::set_status(pool, id, LeaveStatus::Cancelled, None, None).await?)
}

pub async fn delete(pool: &SqlitePool, ctx: &ServiceContext, id: i64) -> ServiceResult<()> {
    let _ = load_with_access(pool, ctx, id).await?;
    repository::leave::delete(pool, id).await?;
    Ok(())
}

/// Annual balance snapshot for one employee and year: the fixed allotment
/// minus approved annual days, plus uncapped sick/unpaid usage.
pub async fn balance(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    employee_id: i64,
    year: i32,
) -> ServiceResult<LeaveBalance> {
    let employee = repository::employee::find_by_id(pool, employee_id)
        .await?
        .ok_or_else(|| {
            ServiceError::domain_msg(
                ErrorCode::EmployeeNotFound,
                format!("Employee {employee_id} not found"),
            )
        })?;
    access::require_access(ctx, "employee", employee_id, employee.establishment_id)?;
    balance_unchecked(pool, employee_id, year).await
}

/// Balance computation without the access check, for internal callers that
/// already validated the employee.
async fn balance_unchecked(
    pool: &SqlitePool,
    employee_id: i64,
    year: i32,
) -> ServiceResult<LeaveBalance> {
    let (from, to) = time::year_bounds(year);
    let annual_used =
        repository::leave::approved_type_days(pool, employee_id, LeaveType::Annual, &from, &to)
            .await?;
    let sick_used =
        repository::leave::approved_type_days(pool, employee_id, LeaveType::Sick, &from, &to)
            .await?;
    let unpaid_used =
        repository::leave::approved_type_days(pool, employee_id, LeaveType::Unpaid, &from, &to)
            .await?;

    Ok(LeaveBalance {
        employee_id,
        year,
        annual_allotment: ANNUAL_ALLOTMENT_DAYS,
        annual_used,
        annual_remaining: ANNUAL_ALLOTMENT_DAYS - annual_used,
        sick_used,
        unpaid_used,
    })
}

/// Counts by status and total approved days, scoped by the caller's
/// establishment filter.
pub async fn summary(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    filter: &LeaveFilter,
) -> ServiceResult<LeaveSummary> {
    let scope = ctx.scope_or(filter.establishment_id);
    let bounds = filter.year.map(time::year_bounds);
    let rows = repository::leave::status_counts(pool, scope, filter.employee_id, bounds).await?;

    let mut summary = LeaveSummary::default();
    for (status, count, days) in rows {
        summary.total += count;
        match status {
            LeaveStatus::Pending => summary.pending = count,
            LeaveStatus::Approved => {
                summary.approved = count;
                summary.approved_days = days;
            }
            LeaveStatus::Rejected => summary.rejected = count,
            LeaveStatus::Cancelled => summary.cancelled = count,
        }
    }
    Ok(summary)
}

/// Fetch a leave and verify establishment access through its employee.
async fn load_with_access(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    id: i64,
) -> ServiceResult<(Leave, i64)> {
    let leave = repository::leave::find_by_id(pool, id).await?.ok_or_else(|| {
        ServiceError::domain_msg(ErrorCode::LeaveNotFound, format!("Leave {id} not found"))
    })?;
    let employee = repository::employee::find_by_id(pool, leave.employee_id)
        .await?
        .ok_or_else(|| {
            ServiceError::domain_msg(
                ErrorCode::EmployeeNotFound,
                format!("Employee {} not found", leave.employee_id),
            )
        })?;
    access::require_access(ctx, "leave", id, employee.establishment_id)?;
    Ok((leave, employee.establishment_id))
}

fn guard_transition(current: LeaveStatus, next: LeaveStatus) -> ServiceResult<()> {
    if current.can_transition_to(next) {
        return Ok(());
    }
    Err(ServiceError::domain_msg(
        ErrorCode::LeaveInvalidTransition,
        format!("Cannot move leave from {current:?} to {next:?}"),
    ))
}
