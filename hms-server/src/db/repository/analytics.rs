//! Read-side aggregation queries for analytics.
//!
//! Date parameters are inclusive `YYYY-MM-DD` bounds except where a function
//! documents a half-open end. Callers authorize the establishment id before
//! reaching this layer.

use super::RepoResult;
use shared::models::Booking;
use sqlx::SqlitePool;

/// Realized revenue: Σ (total − balance) over PAID/PARTIAL invoices issued
/// in `[from, to]`.
pub async fn revenue_total(
    pool: &SqlitePool,
    establishment_id: i64,
    from: &str,
    to: &str,
) -> RepoResult<f64> {
    let total = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(SUM(total - balance), 0.0) FROM invoice WHERE establishment_id = ? AND issued_date >= ? AND issued_date <= ? AND status IN ('PAID', 'PARTIAL')",
    )
    .bind(establishment_id)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;
    Ok(total)
}

/// Σ approved expense amounts in `[from, to]`.
pub async fn expenses_total(
    pool: &SqlitePool,
    establishment_id: i64,
    from: &str,
    to: &str,
) -> RepoResult<f64> {
    let total = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(SUM(amount), 0.0) FROM expense WHERE establishment_id = ? AND expense_date >= ? AND expense_date <= ? AND status = 'APPROVED'",
    )
    .bind(establishment_id)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;
    Ok(total)
}

pub async fn active_accommodation_count(
    pool: &SqlitePool,
    establishment_id: i64,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM accommodation WHERE establishment_id = ? AND is_active = 1",
    )
    .bind(establishment_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// CONFIRMED/COMPLETED bookings whose stay `[check_in, check_out)` intersects
/// `[from, end_exclusive)`. The caller clips each stay to the range.
pub async fn overlapping_bookings(
    pool: &SqlitePool,
    establishment_id: i64,
    from: &str,
    end_exclusive: &str,
) -> RepoResult<Vec<Booking>> {
    let rows = sqlx::query_as::<_, Booking>(
        "SELECT id, establishment_id, accommodation_id, guest_name, check_in, check_out, status, total_amount, created_at, updated_at FROM booking WHERE establishment_id = ? AND status IN ('CONFIRMED', 'COMPLETED') AND check_in < ? AND check_out > ?",
    )
    .bind(establishment_id)
    .bind(end_exclusive)
    .bind(from)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Booking counts per status, keyed on check-in dates in `[from, to]`.
pub async fn booking_status_counts(
    pool: &SqlitePool,
    establishment_id: i64,
    from: &str,
    to: &str,
) -> RepoResult<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT status, COUNT(*) FROM booking WHERE establishment_id = ? AND check_in >= ? AND check_in <= ? GROUP BY status",
    )
    .bind(establishment_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Realized revenue bucketed by period. `bucket_expr` must be one of the
/// vetted SQL expressions from the analytics service (never user input).
pub async fn revenue_by_bucket(
    pool: &SqlitePool,
    establishment_id: i64,
    from: &str,
    to: &str,
    bucket_expr: &str,
) -> RepoResult<Vec<(String, f64)>> {
    let sql = format!(
        "SELECT {bucket_expr} AS period, COALESCE(SUM(total - balance), 0.0) AS total FROM invoice WHERE establishment_id = ? AND issued_date >= ? AND issued_date <= ? AND status IN ('PAID', 'PARTIAL') GROUP BY period ORDER BY period ASC",
    );
    let rows = sqlx::query_as::<_, (String, f64)>(&sql)
        .bind(establishment_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Approved expense totals per category, highest first.
pub async fn expenses_by_category(
    pool: &SqlitePool,
    establishment_id: i64,
    from: &str,
    to: &str,
) -> RepoResult<Vec<(String, f64)>> {
    let rows = sqlx::query_as::<_, (String, f64)>(
        "SELECT category, COALESCE(SUM(amount), 0.0) AS total FROM expense WHERE establishment_id = ? AND expense_date >= ? AND expense_date <= ? AND status = 'APPROVED' GROUP BY category ORDER BY total DESC",
    )
    .bind(establishment_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
