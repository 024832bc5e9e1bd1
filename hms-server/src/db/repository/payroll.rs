//! Payroll repository
//!
//! Pay item lists live in JSON columns; the row type here maps them to and
//! from the wire model. The (employee_id, year, month) pair is unique at the
//! schema level — duplicate periods surface as constraint violations, not
//! as application-level checks.

use super::{RepoError, RepoResult};
use shared::models::{PayItem, Payroll, PayrollStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

/// Raw payroll row with JSON text columns.
#[derive(sqlx::FromRow)]
struct PayrollRow {
    id: i64,
    employee_id: i64,
    year: i32,
    month: i32,
    base_salary: f64,
    allowances: String,
    deductions: String,
    bonuses: String,
    overtime_hours: f64,
    overtime_rate: f64,
    gross_total: f64,
    deductions_total: f64,
    net_total: f64,
    status: PayrollStatus,
    paid_at: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

impl PayrollRow {
    fn into_payroll(self) -> RepoResult<Payroll> {
        let parse = |json: &str| -> RepoResult<Vec<PayItem>> {
            serde_json::from_str(json)
                .map_err(|e| RepoError::Database(format!("Corrupt pay item list: {e}")))
        };
        Ok(Payroll {
            id: self.id,
            employee_id: self.employee_id,
            year: self.year,
            month: self.month,
            base_salary: self.base_salary,
            allowances: parse(&self.allowances)?,
            deductions: parse(&self.deductions)?,
            bonuses: parse(&self.bonuses)?,
            overtime_hours: self.overtime_hours,
            overtime_rate: self.overtime_rate,
            gross_total: self.gross_total,
            deductions_total: self.deductions_total,
            net_total: self.net_total,
            status: self.status,
            paid_at: self.paid_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn to_json(items: &[PayItem]) -> RepoResult<String> {
    serde_json::to_string(items)
        .map_err(|e| RepoError::Database(format!("Failed to encode pay items: {e}")))
}

/// Fully-computed payroll values ready for insertion.
pub struct PayrollInsert<'a> {
    pub employee_id: i64,
    pub year: i32,
    pub month: i32,
    pub base_salary: f64,
    pub allowances: &'a [PayItem],
    pub deductions: &'a [PayItem],
    pub bonuses: &'a [PayItem],
    pub overtime_hours: f64,
    pub overtime_rate: f64,
    pub gross_total: f64,
    pub deductions_total: f64,
    pub net_total: f64,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Payroll>> {
    let row = sqlx::query_as::<_, PayrollRow>(
        "SELECT id, employee_id, year, month, base_salary, allowances, deductions, bonuses, overtime_hours, overtime_rate, gross_total, deductions_total, net_total, status, paid_at, created_at, updated_at FROM payroll WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(PayrollRow::into_payroll).transpose()
}

/// Insert a DRAFT payroll. A duplicate (employee, year, month) fails with
/// [`RepoError::Duplicate`] from the unique index.
pub async fn create(pool: &SqlitePool, ins: &PayrollInsert<'_>) -> RepoResult<Payroll> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO payroll (id, employee_id, year, month, base_salary, allowances, deductions, bonuses, overtime_hours, overtime_rate, gross_total, deductions_total, net_total, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'DRAFT', ?, ?)",
    )
    .bind(id)
    .bind(ins.employee_id)
    .bind(ins.year)
    .bind(ins.month)
    .bind(ins.base_salary)
    .bind(to_json(ins.allowances)?)
    .bind(to_json(ins.deductions)?)
    .bind(to_json(ins.bonuses)?)
    .bind(ins.overtime_hours)
    .bind(ins.overtime_rate)
    .bind(ins.gross_total)
    .bind(ins.deductions_total)
    .bind(ins.net_total)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create payroll".into()))
}

/// Insert a DRAFT payroll unless the period already exists for the employee.
/// Returns `None` when skipped. Used by bulk generation.
pub async fn create_if_absent(
    pool: &SqlitePool,
    ins: &PayrollInsert<'_>,
) -> RepoResult<Option<Payroll>> {
    let id = snowflake_id();
    let now = now_millis();
    let rows = sqlx::query(
        "INSERT OR IGNORE INTO payroll (id, employee_id, year, month, base_salary, allowances, deductions, bonuses, overtime_hours, overtime_rate, gross_total, deductions_total, net_total, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'DRAFT', ?, ?)",
    )
    .bind(id)
    .bind(ins.employee_id)
    .bind(ins.year)
    .bind(ins.month)
    .bind(ins.base_salary)
    .bind(to_json(ins.allowances)?)
    .bind(to_json(ins.deductions)?)
    .bind(to_json(ins.bonuses)?)
    .bind(ins.overtime_hours)
    .bind(ins.overtime_rate)
    .bind(ins.gross_total)
    .bind(ins.deductions_total)
    .bind(ins.net_total)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}

/// One page of payrolls plus the total count. Establishment scope applies
/// through the owning employee.
pub async fn find_page(
    pool: &SqlitePool,
    scope: Option<i64>,
    employee_id: Option<i64>,
    year: Option<i32>,
    month: Option<i32>,
    limit: i64,
    offset: i64,
) -> RepoResult<(Vec<Payroll>, i64)> {
    let rows = sqlx::query_as::<_, PayrollRow>(
        "SELECT p.id, p.employee_id, p.year, p.month, p.base_salary, p.allowances, p.deductions, p.bonuses, p.overtime_hours, p.overtime_rate, p.gross_total, p.deductions_total, p.net_total, p.status, p.paid_at, p.created_at, p.updated_at FROM payroll p JOIN employee e ON e.id = p.employee_id WHERE (?1 IS NULL OR e.establishment_id = ?1) AND (?2 IS NULL OR p.employee_id = ?2) AND (?3 IS NULL OR p.year = ?3) AND (?4 IS NULL OR p.month = ?4) ORDER BY p.year DESC, p.month DESC, p.employee_id LIMIT ?5 OFFSET ?6",
    )
    .bind(scope)
    .bind(employee_id)
    .bind(year)
    .bind(month)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM payroll p JOIN employee e ON e.id = p.employee_id WHERE (?1 IS NULL OR e.establishment_id = ?1) AND (?2 IS NULL OR p.employee_id = ?2) AND (?3 IS NULL OR p.year = ?3) AND (?4 IS NULL OR p.month = ?4)",
    )
    .bind(scope)
    .bind(employee_id)
    .bind(year)
    .bind(month)
    .fetch_one(pool)
    .await?;

    let payrolls = rows
        .into_iter()
        .map(PayrollRow::into_payroll)
        .collect::<RepoResult<Vec<_>>>()?;
    Ok((payrolls, total))
}

pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    status: PayrollStatus,
    paid_at: Option<i64>,
) -> RepoResult<Payroll> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE payroll SET status = ?, paid_at = COALESCE(?, paid_at), updated_at = ? WHERE id = ?",
    )
    .bind(status)
    .bind(paid_at)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Payroll {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Payroll {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM payroll WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Aggregate (count, gross, deductions, net) over a period within the scope.
pub async fn period_totals(
    pool: &SqlitePool,
    scope: Option<i64>,
    year: i32,
    month: i32,
) -> RepoResult<(i64, f64, f64, f64)> {
    let row = sqlx::query_as::<_, (i64, f64, f64, f64)>(
        "SELECT COUNT(*), COALESCE(SUM(p.gross_total), 0.0), COALESCE(SUM(p.deductions_total), 0.0), COALESCE(SUM(p.net_total), 0.0) FROM payroll p JOIN employee e ON e.id = p.employee_id WHERE (?1 IS NULL OR e.establishment_id = ?1) AND p.year = ?2 AND p.month = ?3",
    )
    .bind(scope)
    .bind(year)
    .bind(month)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
