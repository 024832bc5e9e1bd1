//! Leave repository

use super::{RepoError, RepoResult};
use shared::models::{Leave, LeaveCreate, LeaveStatus, LeaveType};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Leave>> {
    let row = sqlx::query_as::<_, Leave>(
        "SELECT id, employee_id, leave_type, start_date, end_date, days, status, reason, approved_by, approved_at, rejection_reason, created_at, updated_at FROM leave WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a PENDING leave, failing with [`RepoError::Duplicate`] when a
/// pending/approved leave of the same employee overlaps the requested range.
///
/// The check and the insert share one IMMEDIATE transaction, so concurrent
/// creates serialize on the write lock instead of racing check-then-act.
pub async fn create(pool: &SqlitePool, data: &LeaveCreate, days: i64) -> RepoResult<Leave> {
    let mut conn = pool.acquire().await?;
    sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

    let id = match guarded_insert(&mut conn, data, days).await {
        Ok(id) => {
            sqlx::query("COMMIT").execute(&mut *conn).await?;
            id
        }
        Err(e) => {
            let _ = sqlx::query("ROLLBACK").execute(&mut *conn).await;
            return Err(e);
        }
    };
    drop(conn);

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create leave".into()))
}

async fn guarded_insert(
    conn: &mut sqlx::pool::PoolConnection<sqlx::Sqlite>,
    data: &LeaveCreate,
    days: i64,
) -> RepoResult<i64> {
    let overlapping = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM leave WHERE employee_id = ? AND status IN ('PENDING', 'APPROVED') AND start_date <= ? AND end_date >= ?",
    )
    .bind(data.employee_id)
    .bind(&data.end_date)
    .bind(&data.start_date)
    .fetch_one(&mut **conn)
    .await?;

    if overlapping > 0 {
        return Err(RepoError::Duplicate(format!(
            "Employee {} already has a pending or approved leave overlapping {}..{}",
            data.employee_id, data.start_date, data.end_date
        )));
    }

    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO leave (id, employee_id, leave_type, start_date, end_date, days, status, reason, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, 'PENDING', ?, ?, ?)",
    )
    .bind(id)
    .bind(data.employee_id)
    .bind(data.leave_type)
    .bind(&data.start_date)
    .bind(&data.end_date)
    .bind(days)
    .bind(&data.reason)
    .bind(now)
    .bind(now)
    .execute(&mut **conn)
    .await?;

    Ok(id)
}

/// One page of leaves plus the total count. Establishment scope applies
/// through the owning employee.
pub async fn find_page(
    pool: &SqlitePool,
    scope: Option<i64>,
    employee_id: Option<i64>,
    status: Option<LeaveStatus>,
    limit: i64,
    offset: i64,
) -> RepoResult<(Vec<Leave>, i64)> {
    let rows = sqlx::query_as::<_, Leave>(
        "SELECT l.id, l.employee_id, l.leave_type, l.start_date, l.end_date, l.days, l.status, l.reason, l.approved_by, l.approved_at, l.rejection_reason, l.created_at, l.updated_at FROM leave l JOIN employee e ON e.id = l.employee_id WHERE (?1 IS NULL OR e.establishment_id = ?1) AND (?2 IS NULL OR l.employee_id = ?2) AND (?3 IS NULL OR l.status = ?3) ORDER BY l.start_date DESC LIMIT ?4 OFFSET ?5",
    )
    .bind(scope)
    .bind(employee_id)
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM leave l JOIN employee e ON e.id = l.employee_id WHERE (?1 IS NULL OR e.establishment_id = ?1) AND (?2 IS NULL OR l.employee_id = ?2) AND (?3 IS NULL OR l.status = ?3)",
    )
    .bind(scope)
    .bind(employee_id)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok((rows, total))
}

/// Approved days of one leave type for an employee, over leaves starting in
/// `[from, to]`. Backs the annual balance computation.
pub async fn approved_type_days(
    pool: &SqlitePool,
    employee_id: i64,
    leave_type: LeaveType,
    from: &str,
    to: &str,
) -> RepoResult<i64> {
    let days = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(days), 0) FROM leave WHERE employee_id = ? AND leave_type = ? AND status = 'APPROVED' AND start_date >= ? AND start_date <= ?",
    )
    .bind(employee_id)
    .bind(leave_type)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;
    Ok(days)
}

/// Per-status (count, total days) rows within the scope.
pub async fn status_counts(
    pool: &SqlitePool,
    scope: Option<i64>,
    employee_id: Option<i64>,
    date_bounds: Option<(String, String)>,
) -> RepoResult<Vec<(LeaveStatus, i64, i64)>> {
    let (from, to) = match date_bounds {
        Some((from, to)) => (Some(from), Some(to)),
        None => (None, None),
    };
    let rows = sqlx::query_as::<_, (LeaveStatus, i64, i64)>(
        "SELECT l.status, COUNT(*), SUM(l.days) FROM leave l JOIN employee e ON e.id = l.employee_id WHERE (?1 IS NULL OR e.establishment_id = ?1) AND (?2 IS NULL OR l.employee_id = ?2) AND (?3 IS NULL OR l.start_date >= ?3) AND (?4 IS NULL OR l.start_date <= ?4) GROUP BY l.status",
    )
    .bind(scope)
    .bind(employee_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Mutate a leave's status, stamping approver metadata when provided.
pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    status: LeaveStatus,
    approved_by: Option<i64>,
    rejection_reason: Option<&str>,
) -> RepoResult<Leave> {
    let now = now_millis();
    let approved_at = approved_by.map(|_| now);
    let rows = sqlx::query(
        "UPDATE leave SET status = ?, approved_by = COALESCE(?, approved_by), approved_at = COALESCE(?, approved_at), rejection_reason = COALESCE(?, rejection_reason), updated_at = ? WHERE id = ?",
    )
    .bind(status)
    .bind(approved_by)
    .bind(approved_at)
    .bind(rejection_reason)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Leave {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Leave {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM leave WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
