//! Employee repository

use super::{RepoError, RepoResult};
use shared::models::{Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let row = sqlx::query_as::<_, Employee>(
        "SELECT id, first_name, last_name, email, phone, position, department, establishment_id, hire_date, contract_type, base_salary, status, created_at, updated_at FROM employee WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// One page of employees plus the total count, optionally filtered by
/// establishment and status.
pub async fn find_page(
    pool: &SqlitePool,
    scope: Option<i64>,
    status: Option<EmployeeStatus>,
    limit: i64,
    offset: i64,
) -> RepoResult<(Vec<Employee>, i64)> {
    let rows = sqlx::query_as::<_, Employee>(
        "SELECT id, first_name, last_name, email, phone, position, department, establishment_id, hire_date, contract_type, base_salary, status, created_at, updated_at FROM employee WHERE (?1 IS NULL OR establishment_id = ?1) AND (?2 IS NULL OR status = ?2) ORDER BY last_name, first_name LIMIT ?3 OFFSET ?4",
    )
    .bind(scope)
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM employee WHERE (?1 IS NULL OR establishment_id = ?1) AND (?2 IS NULL OR status = ?2)",
    )
    .bind(scope)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok((rows, total))
}

/// All ACTIVE employees, optionally restricted to one establishment.
/// Used by payroll generation.
pub async fn find_active(pool: &SqlitePool, scope: Option<i64>) -> RepoResult<Vec<Employee>> {
    let rows = sqlx::query_as::<_, Employee>(
        "SELECT id, first_name, last_name, email, phone, position, department, establishment_id, hire_date, contract_type, base_salary, status, created_at, updated_at FROM employee WHERE status = 'ACTIVE' AND (?1 IS NULL OR establishment_id = ?1) ORDER BY id",
    )
    .bind(scope)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Headcount per status within the scope.
pub async fn count_by_status(
    pool: &SqlitePool,
    scope: Option<i64>,
) -> RepoResult<Vec<(EmployeeStatus, i64)>> {
    let rows = sqlx::query_as::<_, (EmployeeStatus, i64)>(
        "SELECT status, COUNT(*) FROM employee WHERE (?1 IS NULL OR establishment_id = ?1) GROUP BY status",
    )
    .bind(scope)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: &EmployeeCreate) -> RepoResult<Employee> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO employee (id, first_name, last_name, email, phone, position, department, establishment_id, hire_date, contract_type, base_salary, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'ACTIVE', ?, ?)",
    )
    .bind(id)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.position)
    .bind(&data.department)
    .bind(data.establishment_id)
    .bind(&data.hire_date)
    .bind(data.contract_type)
    .bind(data.base_salary)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &EmployeeUpdate,
) -> RepoResult<Option<Employee>> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE employee SET first_name = COALESCE(?, first_name), last_name = COALESCE(?, last_name), email = COALESCE(?, email), phone = COALESCE(?, phone), position = COALESCE(?, position), department = COALESCE(?, department), establishment_id = COALESCE(?, establishment_id), contract_type = COALESCE(?, contract_type), base_salary = COALESCE(?, base_salary), status = COALESCE(?, status), updated_at = ? WHERE id = ?",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.position)
    .bind(&data.department)
    .bind(data.establishment_id)
    .bind(data.contract_type)
    .bind(data.base_salary)
    .bind(data.status)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
