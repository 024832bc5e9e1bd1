//! Report API handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::access;
use crate::services::analytics::DateRange;
use crate::services::report::{
    self, ComparisonReport, FinancialReport, HrReport, OccupancyReport,
};
use shared::AppResult;

#[derive(Debug, Deserialize)]
pub struct ReportRangeQuery {
    pub establishment_id: i64,
    pub from: String,
    pub to: String,
}

pub async fn financial(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ReportRangeQuery>,
) -> AppResult<Json<FinancialReport>> {
    let ctx = user.context();
    access::require_access(&ctx, "establishment", query.establishment_id, query.establishment_id)?;
    let range = DateRange::parse(&query.from, &query.to)?;
    let result = report::financial(state.pool(), query.establishment_id, range).await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct HrReportQuery {
    pub establishment_id: Option<i64>,
    pub year: i32,
    pub month: i32,
}

pub async fn hr(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<HrReportQuery>,
) -> AppResult<Json<HrReport>> {
    let ctx = user.context();
    if let Some(est) = query.establishment_id {
        access::require_access(&ctx, "establishment", est, est)?;
    }
    let result = report::hr(state.pool(), &ctx, query.establishment_id, query.year, query.month)
        .await?;
    Ok(Json(result))
}

pub async fn occupancy(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ReportRangeQuery>,
) -> AppResult<Json<OccupancyReport>> {
    let ctx = user.context();
    access::require_access(&ctx, "establishment", query.establishment_id, query.establishment_id)?;
    let range = DateRange::parse(&query.from, &query.to)?;
    let result = report::occupancy(state.pool(), query.establishment_id, range).await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct ComparisonQuery {
    pub from: String,
    pub to: String,
}

/// Cross-establishment comparison; scoped callers get a single-row report
/// for their own establishment.
pub async fn comparison(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ComparisonQuery>,
) -> AppResult<Json<ComparisonReport>> {
    let ctx = user.context();
    let range = DateRange::parse(&query.from, &query.to)?;
    let result = report::comparison(state.pool(), &ctx, range).await?;
    Ok(Json(result))
}
