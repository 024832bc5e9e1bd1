//! Report assembly.
//!
//! Composes the analytics aggregates and the leave/payroll summaries into
//! report DTOs. No algorithmic content of its own; establishment ids are
//! authorized by the handlers before assembly starts.

use serde::Serialize;
use shared::ErrorCode;
use shared::models::{EmployeeStatus, LeaveFilter, LeaveSummary, PayrollSummary};
use sqlx::SqlitePool;

use super::analytics::{self, CategoryTotal, DateRange, FinancialSummary, OccupancyBreakdown, PeriodBucket, PeriodTotal};
use super::{ServiceError, ServiceResult, leave, payroll};
use crate::auth::ServiceContext;
use crate::db::repository;

/// Financial report for one establishment and range.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialReport {
    pub establishment_id: i64,
    pub from: String,
    pub to: String,
    pub summary: FinancialSummary,
    pub revenue_by_month: Vec<PeriodTotal>,
    pub expenses_by_category: Vec<CategoryTotal>,
}

/// Employee headcount by status.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Headcount {
    pub total: i64,
    pub active: i64,
    pub on_leave: i64,
    pub terminated: i64,
}

/// HR report: headcount plus leave and payroll summaries for a period.
#[derive(Debug, Clone, Serialize)]
pub struct HrReport {
    pub establishment_id: Option<i64>,
    pub year: i32,
    pub month: i32,
    pub headcount: Headcount,
    pub leaves: LeaveSummary,
    pub payroll: PayrollSummary,
}

/// Occupancy report for one establishment and range.
#[derive(Debug, Clone, Serialize)]
pub struct OccupancyReport {
    pub establishment_id: i64,
    pub from: String,
    pub to: String,
    #[serde(flatten)]
    pub occupancy: OccupancyBreakdown,
}

/// One establishment's row in the comparison report.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonEntry {
    pub establishment_id: i64,
    pub establishment_name: String,
    pub revenue: f64,
    pub expenses: f64,
    pub net_profit: f64,
    pub profit_margin: f64,
    pub occupancy_rate: f64,
}

/// Side-by-side financial summaries across establishments.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub from: String,
    pub to: String,
    pub establishments: Vec<ComparisonEntry>,
}

pub async fn financial(
    pool: &SqlitePool,
    establishment_id: i64,
    range: DateRange,
) -> ServiceResult<FinancialReport> {
    let summary = analytics::financial_summary(pool, establishment_id, range).await?;
    let revenue_by_month =
        analytics::revenue_by_period(pool, establishment_id, range, PeriodBucket::Month).await?;
    let expenses_by_category =
        analytics::expenses_by_category(pool, establishment_id, range).await?;

    Ok(FinancialReport {
        establishment_id,
        from: range.from.to_string(),
        to: range.to.to_string(),
        summary,
        revenue_by_month,
        expenses_by_category,
    })
}

pub async fn hr(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    establishment_id: Option<i64>,
    year: i32,
    month: i32,
) -> ServiceResult<HrReport> {
    let scope = ctx.scope_or(establishment_id);

    let mut headcount = Headcount::default();
    for (status, count) in repository::employee::count_by_status(pool, scope).await? {
        headcount.total += count;
        match status {
            EmployeeStatus::Active => headcount.active = count,
            EmployeeStatus::OnLeave => headcount.on_leave = count,
            EmployeeStatus::Terminated => headcount.terminated = count,
        }
    }

    let leaves = leave::summary(
        pool,
        ctx,
        &LeaveFilter {
            establishment_id,
            year: Some(year),
            ..Default::default()
        },
    )
    .await?;
    let payroll = payroll::summary(pool, ctx, year, month, establishment_id).await?;

    Ok(HrReport {
        establishment_id: scope,
        year,
        month,
        headcount,
        leaves,
        payroll,
    })
}

pub async fn occupancy(
    pool: &SqlitePool,
    establishment_id: i64,
    range: DateRange,
) -> ServiceResult<OccupancyReport> {
    let occupancy = analytics::occupancy(pool, establishment_id, range).await?;
    Ok(OccupancyReport {
        establishment_id,
        from: range.from.to_string(),
        to: range.to.to_string(),
        occupancy,
    })
}

/// Per-establishment financial summaries side by side. Global callers
/// compare every active establishment; scoped callers get a single row for
/// their own.
pub async fn comparison(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    range: DateRange,
) -> ServiceResult<ComparisonReport> {
    let establishments = match ctx.scope() {
        None => repository::establishment::find_active(pool).await?,
        Some(own) => {
            let establishment = repository::establishment::find_by_id(pool, own)
                .await?
                .ok_or_else(|| {
                    ServiceError::domain_msg(
                        ErrorCode::EstablishmentNotFound,
                        format!("Establishment {own} not found"),
                    )
                })?;
            vec![establishment]
        }
    };

    let mut entries = Vec::with_capacity(establishments.len());
    for establishment in establishments {
        let summary = analytics::financial_summary(pool, establishment.id, range).await?;
        entries.push(ComparisonEntry {
            establishment_id: establishment.id,
            establishment_name: establishment.name,
            revenue: summary.revenue,
            expenses: summary.expenses,
            net_profit: summary.net_profit,
            profit_margin: summary.profit_margin,
            occupancy_rate: summary.occupancy_rate,
        });
    }

    Ok(ComparisonReport {
        from: range.from.to_string(),
        to: range.to.to_string(),
        establishments: entries,
    })
}
