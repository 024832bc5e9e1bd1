//! Read-side analytics.
//!
//! Pure computation over bookings, invoices and expenses. No access-control
//! coupling here: the establishment id has been authorized by the handler
//! before these functions run. All monetary results carry 2-decimal
//! rounding; rate computations guard their zero denominators.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::ErrorCode;
use shared::util::round2;
use sqlx::SqlitePool;

use super::{ServiceError, ServiceResult};
use crate::db::repository;
use crate::utils::time;

/// Validated inclusive date range.
#[derive(Debug, Clone, Copy)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn parse(from: &str, to: &str) -> ServiceResult<Self> {
        let from = time::parse_date(from)?;
        let to = time::parse_date(to)?;
        if to < from {
            return Err(ServiceError::domain_msg(
                ErrorCode::ValidationFailed,
                format!("Range end {to} precedes start {from}"),
            ));
        }
        Ok(Self { from, to })
    }

    fn from_str(&self) -> String {
        self.from.format("%Y-%m-%d").to_string()
    }

    fn to_str(&self) -> String {
        self.to.format("%Y-%m-%d").to_string()
    }

    /// Exclusive end, for half-open night arithmetic.
    fn end_exclusive(&self) -> NaiveDate {
        time::next_day(self.to)
    }

    /// Number of nights covered by the range (inclusive day count).
    fn nights(&self) -> i64 {
        time::inclusive_days(self.from, self.to)
    }
}

/// Grouping granularity for revenue bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodBucket {
    Day,
    Week,
    Month,
}

impl PeriodBucket {
    /// SQL expression producing the bucket label from `issued_date`.
    /// Fixed strings only — never derived from user input.
    fn sql_expr(&self) -> &'static str {
        match self {
            PeriodBucket::Day => "issued_date",
            PeriodBucket::Week => "strftime('%Y-W%W', issued_date)",
            PeriodBucket::Month => "substr(issued_date, 1, 7)",
        }
    }
}

/// One bucketed revenue total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotal {
    pub period: String,
    pub total: f64,
}

/// One expense category total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Booking count for one status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingStatusCount {
    pub status: String,
    pub count: i64,
}

/// Occupancy figures over a range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancyBreakdown {
    pub total_accommodations: i64,
    pub available_nights: i64,
    pub occupied_nights: i64,
    /// Percentage, 0 when there are no accommodations
    pub occupancy_rate: f64,
}

/// Composed financial picture for one establishment and range.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialSummary {
    pub revenue: f64,
    pub expenses: f64,
    pub net_profit: f64,
    /// Percentage, 0 when revenue is 0
    pub profit_margin: f64,
    pub occupancy_rate: f64,
    pub booking_counts: Vec<BookingStatusCount>,
}

/// Realized revenue: Σ (total − balance) over PAID/PARTIAL invoices issued
/// in the range.
pub async fn total_revenue(
    pool: &SqlitePool,
    establishment_id: i64,
    range: DateRange,
) -> ServiceResult<f64> {
    let total = repository::analytics::revenue_total(
        pool,
        establishment_id,
        &range.from_str(),
        &range.to_str(),
    )
    .await?;
    Ok(round2(total))
}

/// Σ approved expenses in the range.
pub async fn total_expenses(
    pool: &SqlitePool,
    establishment_id: i64,
    range: DateRange,
) -> ServiceResult<f64> {
    let total = repository::analytics::expenses_total(
        pool,
        establishment_id,
        &range.from_str(),
        &range.to_str(),
    )
    .await?;
    Ok(round2(total))
}

/// Occupied accommodation-nights over available nights, as a percentage.
///
/// Each CONFIRMED/COMPLETED booking's `[check_in, check_out)` stay is
/// clipped to the range; a range with zero active accommodations yields 0.
pub async fn occupancy(
    pool: &SqlitePool,
    establishment_id: i64,
    range: DateRange,
) -> ServiceResult<OccupancyBreakdown> {
    let total_accommodations =
        repository::analytics::active_accommodation_count(pool, establishment_id).await?;
    let available_nights = total_accommodations * range.nights();

    if total_accommodations == 0 {
        return Ok(OccupancyBreakdown {
            total_accommodations: 0,
            available_nights: 0,
            occupied_nights: 0,
            occupancy_rate: 0.0,
        });
    }

    let end_exclusive = range.end_exclusive().format("%Y-%m-%d").to_string();
    let bookings = repository::analytics::overlapping_bookings(
        pool,
        establishment_id,
        &range.from_str(),
        &end_exclusive,
    )
    .await?;

    let mut occupied_nights = 0;
    for booking in &bookings {
        occupied_nights += clipped_nights(
            &booking.check_in,
            &booking.check_out,
            range.from,
            range.end_exclusive(),
        )?;
    }

    let occupancy_rate = round2(occupied_nights as f64 / available_nights as f64 * 100.0);
    Ok(OccupancyBreakdown {
        total_accommodations,
        available_nights,
        occupied_nights,
        occupancy_rate,
    })
}

/// Convenience wrapper returning just the rate.
pub async fn occupancy_rate(
    pool: &SqlitePool,
    establishment_id: i64,
    range: DateRange,
) -> ServiceResult<f64> {
    Ok(occupancy(pool, establishment_id, range).await?.occupancy_rate)
}

/// Revenue, expenses, booking-status counts and occupancy in one object.
/// `profit_margin` is 0 (not NaN) when revenue is 0.
pub async fn financial_summary(
    pool: &SqlitePool,
    establishment_id: i64,
    range: DateRange,
) -> ServiceResult<FinancialSummary> {
    let revenue = total_revenue(pool, establishment_id, range).await?;
    let expenses = total_expenses(pool, establishment_id, range).await?;
    let occupancy = occupancy(pool, establishment_id, range).await?;

    let counts = repository::analytics::booking_status_counts(
        pool,
        establishment_id,
        &range.from_str(),
        &range.to_str(),
    )
    .await?;
    let booking_counts = counts
        .into_iter()
        .map(|(status, count)| BookingStatusCount { status, count })
        .collect();

    let net_profit = round2(revenue - expenses);
    let profit_margin = if revenue == 0.0 {
        0.0
    } else {
        round2(net_profit / revenue * 100.0)
    };

    Ok(FinancialSummary {
        revenue,
        expenses,
        net_profit,
        profit_margin,
        occupancy_rate: occupancy.occupancy_rate,
        booking_counts,
    })
}

/// Revenue bucketed by day/week/month, ascending by period.
pub async fn revenue_by_period(
    pool: &SqlitePool,
    establishment_id: i64,
    range: DateRange,
    bucket: PeriodBucket,
) -> ServiceResult<Vec<PeriodTotal>> {
    let rows = repository::analytics::revenue_by_bucket(
        pool,
        establishment_id,
        &range.from_str(),
        &range.to_str(),
        bucket.sql_expr(),
    )
    .await?;
    Ok(rows
        .into_iter()
        .map(|(period, total)| PeriodTotal {
            period,
            total: round2(total),
        })
        .collect())
}

/// Approved expense totals per category, descending by total.
pub async fn expenses_by_category(
    pool: &SqlitePool,
    establishment_id: i64,
    range: DateRange,
) -> ServiceResult<Vec<CategoryTotal>> {
    let rows = repository::analytics::expenses_by_category(
        pool,
        establishment_id,
        &range.from_str(),
        &range.to_str(),
    )
    .await?;
    Ok(rows
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category,
            total: round2(total),
        })
        .collect())
}

/// Nights of `[check_in, check_out)` falling inside `[from, end_exclusive)`.
fn clipped_nights(
    check_in: &str,
    check_out: &str,
    from: NaiveDate,
    end_exclusive: NaiveDate,
) -> ServiceResult<i64> {
    let check_in = time::parse_date(check_in)?;
    let check_out = time::parse_date(check_out)?;
    let start = check_in.max(from);
    let end = check_out.min(end_exclusive);
    Ok((end - start).num_days().max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::services::test_support::{
        seed_accommodation, seed_booking, seed_establishment, seed_expense, seed_invoice,
    };

    fn range(from: &str, to: &str) -> DateRange {
        DateRange::parse(from, to).unwrap()
    }

    #[test]
    fn test_range_validation() {
        assert!(DateRange::parse("2025-01-01", "2025-01-31").is_ok());
        assert!(DateRange::parse("2025-01-31", "2025-01-01").is_err());
        assert!(DateRange::parse("2025-01-01", "bogus").is_err());
    }

    #[test]
    fn test_clipped_nights() {
        let from = time::parse_date("2025-03-01").unwrap();
        let end = time::parse_date("2025-03-11").unwrap(); // exclusive

        // Entirely inside: 4 nights
        assert_eq!(clipped_nights("2025-03-02", "2025-03-06", from, end).unwrap(), 4);
        // Straddles the start
        assert_eq!(clipped_nights("2025-02-25", "2025-03-04", from, end).unwrap(), 3);
        // Straddles the end
        assert_eq!(clipped_nights("2025-03-09", "2025-03-15", from, end).unwrap(), 2);
        // Covers the whole range
        assert_eq!(clipped_nights("2025-02-01", "2025-04-01", from, end).unwrap(), 10);
        // Entirely outside
        assert_eq!(clipped_nights("2025-04-01", "2025-04-05", from, end).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_revenue_counts_paid_and_partial_only() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;

        seed_invoice(&pool, est, "F-001", "2025-03-02", 500.0, 0.0, "PAID").await;
        seed_invoice(&pool, est, "F-002", "2025-03-05", 400.0, 150.0, "PARTIAL").await;
        seed_invoice(&pool, est, "F-003", "2025-03-06", 900.0, 900.0, "ISSUED").await;
        seed_invoice(&pool, est, "F-004", "2025-04-01", 100.0, 0.0, "PAID").await; // outside range

        let revenue = total_revenue(&pool, est, range("2025-03-01", "2025-03-31"))
            .await
            .unwrap();
        assert_eq!(revenue, 750.0); // 500 + (400 - 150)
    }

    #[tokio::test]
    async fn test_expenses_approved_only() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;

        seed_expense(&pool, est, "maintenance", "2025-03-02", 200.0, "APPROVED").await;
        seed_expense(&pool, est, "supplies", "2025-03-03", 80.0, "APPROVED").await;
        seed_expense(&pool, est, "supplies", "2025-03-04", 999.0, "PENDING").await;

        let expenses = total_expenses(&pool, est, range("2025-03-01", "2025-03-31"))
            .await
            .unwrap();
        assert_eq!(expenses, 280.0);
    }

    #[tokio::test]
    async fn test_occupancy_zero_accommodations() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;

        let o = occupancy(&pool, est, range("2025-03-01", "2025-03-10")).await.unwrap();
        assert_eq!(o.occupancy_rate, 0.0);
        assert_eq!(o.occupied_nights, 0);
    }

    #[tokio::test]
    async fn test_occupancy_clips_bookings_to_range() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;
        let room_a = seed_accommodation(&pool, est, "Room A").await;
        let room_b = seed_accommodation(&pool, est, "Room B").await;

        // 10-day range (2025-03-01 .. 2025-03-10), 2 rooms → 20 available nights
        // Room A: fully inside, 4 nights
        seed_booking(&pool, est, room_a, "2025-03-02", "2025-03-06", "CONFIRMED").await;
        // Room B: straddles range end, clipped to 2 nights
        seed_booking(&pool, est, room_b, "2025-03-09", "2025-03-15", "COMPLETED").await;
        // Cancelled bookings never count
        seed_booking(&pool, est, room_a, "2025-03-07", "2025-03-09", "CANCELLED").await;

        let o = occupancy(&pool, est, range("2025-03-01", "2025-03-10")).await.unwrap();
        assert_eq!(o.total_accommodations, 2);
        assert_eq!(o.available_nights, 20);
        assert_eq!(o.occupied_nights, 6);
        assert_eq!(o.occupancy_rate, 30.0);
    }

    #[tokio::test]
    async fn test_financial_summary_zero_revenue_zero_margin() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;
        seed_expense(&pool, est, "maintenance", "2025-03-02", 120.0, "APPROVED").await;

        let s = financial_summary(&pool, est, range("2025-03-01", "2025-03-31"))
            .await
            .unwrap();
        assert_eq!(s.revenue, 0.0);
        assert_eq!(s.expenses, 120.0);
        assert_eq!(s.net_profit, -120.0);
        assert_eq!(s.profit_margin, 0.0, "margin must be 0, not NaN");
    }

    #[tokio::test]
    async fn test_financial_summary_composes() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;
        let room = seed_accommodation(&pool, est, "Room A").await;

        seed_invoice(&pool, est, "F-001", "2025-03-02", 1000.0, 0.0, "PAID").await;
        seed_expense(&pool, est, "maintenance", "2025-03-03", 250.0, "APPROVED").await;
        seed_booking(&pool, est, room, "2025-03-02", "2025-03-07", "CONFIRMED").await;
        seed_booking(&pool, est, room, "2025-03-20", "2025-03-22", "PENDING").await;

        let s = financial_summary(&pool, est, range("2025-03-01", "2025-03-31"))
            .await
            .unwrap();
        assert_eq!(s.revenue, 1000.0);
        assert_eq!(s.expenses, 250.0);
        assert_eq!(s.net_profit, 750.0);
        assert_eq!(s.profit_margin, 75.0);
        let confirmed = s.booking_counts.iter().find(|c| c.status == "CONFIRMED").unwrap();
        assert_eq!(confirmed.count, 1);
        let pending = s.booking_counts.iter().find(|c| c.status == "PENDING").unwrap();
        assert_eq!(pending.count, 1);
    }

    #[tokio::test]
    async fn test_revenue_by_period_buckets_ascending() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;

        seed_invoice(&pool, est, "F-001", "2025-01-10", 100.0, 0.0, "PAID").await;
        seed_invoice(&pool, est, "F-002", "2025-01-20", 200.0, 0.0, "PAID").await;
        seed_invoice(&pool, est, "F-003", "2025-02-05", 400.0, 0.0, "PAID").await;

        let monthly = revenue_by_period(
            &pool,
            est,
            range("2025-01-01", "2025-02-28"),
            PeriodBucket::Month,
        )
        .await
        .unwrap();
        assert_eq!(
            monthly,
            vec![
                PeriodTotal { period: "2025-01".into(), total: 300.0 },
                PeriodTotal { period: "2025-02".into(), total: 400.0 },
            ]
        );

        let daily = revenue_by_period(
            &pool,
            est,
            range("2025-01-01", "2025-02-28"),
            PeriodBucket::Day,
        )
        .await
        .unwrap();
        assert_eq!(daily.len(), 3);
        assert_eq!(daily[0].period, "2025-01-10");
    }

    #[tokio::test]
    async fn test_expenses_by_category_descending() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;

        seed_expense(&pool, est, "supplies", "2025-03-02", 50.0, "APPROVED").await;
        seed_expense(&pool, est, "maintenance", "2025-03-03", 300.0, "APPROVED").await;
        seed_expense(&pool, est, "supplies", "2025-03-04", 75.0, "APPROVED").await;

        let by_category = expenses_by_category(&pool, est, range("2025-03-01", "2025-03-31"))
            .await
            .unwrap();
        assert_eq!(
            by_category,
            vec![
                CategoryTotal { category: "maintenance".into(), total: 300.0 },
                CategoryTotal { category: "supplies".into(), total: 125.0 },
            ]
        );
    }
}
