//! Analytics API handlers
//!
//! The analytics services are access-control free by design, so every
//! handler here authorizes the requested establishment against the caller's
//! scope before running a query.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentUser, ServiceContext};
use crate::core::ServerState;
use crate::services::access;
use crate::services::analytics::{
    self, CategoryTotal, DateRange, FinancialSummary, OccupancyBreakdown, PeriodBucket,
    PeriodTotal,
};
use shared::AppResult;

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub establishment_id: i64,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize)]
pub struct BucketedRangeQuery {
    pub establishment_id: i64,
    pub from: String,
    pub to: String,
    pub bucket: PeriodBucket,
}

#[derive(Debug, Serialize)]
pub struct AmountResponse {
    pub establishment_id: i64,
    pub from: String,
    pub to: String,
    pub amount: f64,
}

fn authorize(ctx: &ServiceContext, establishment_id: i64) -> AppResult<()> {
    access::require_access(ctx, "establishment", establishment_id, establishment_id)?;
    Ok(())
}

pub async fn revenue(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<AmountResponse>> {
    let ctx = user.context();
    authorize(&ctx, query.establishment_id)?;
    let range = DateRange::parse(&query.from, &query.to)?;
    let amount = analytics::total_revenue(state.pool(), query.establishment_id, range).await?;
    Ok(Json(AmountResponse {
        establishment_id: query.establishment_id,
        from: query.from,
        to: query.to,
        amount,
    }))
}

pub async fn expenses(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<AmountResponse>> {
    let ctx = user.context();
    authorize(&ctx, query.establishment_id)?;
    let range = DateRange::parse(&query.from, &query.to)?;
    let amount = analytics::total_expenses(state.pool(), query.establishment_id, range).await?;
    Ok(Json(AmountResponse {
        establishment_id: query.establishment_id,
        from: query.from,
        to: query.to,
        amount,
    }))
}

pub async fn occupancy(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<OccupancyBreakdown>> {
    let ctx = user.context();
    authorize(&ctx, query.establishment_id)?;
    let range = DateRange::parse(&query.from, &query.to)?;
    let result = analytics::occupancy(state.pool(), query.establishment_id, range).await?;
    Ok(Json(result))
}

pub async fn financial_summary(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<FinancialSummary>> {
    let ctx = user.context();
    authorize(&ctx, query.establishment_id)?;
    let range = DateRange::parse(&query.from, &query.to)?;
    let result = analytics::financial_summary(state.pool(), query.establishment_id, range).await?;
    Ok(Json(result))
}

pub async fn revenue_by_period(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<BucketedRangeQuery>,
) -> AppResult<Json<Vec<PeriodTotal>>> {
    let ctx = user.context();
    authorize(&ctx, query.establishment_id)?;
    let range = DateRange::parse(&query.from, &query.to)?;
    let result =
        analytics::revenue_by_period(state.pool(), query.establishment_id, range, query.bucket)
            .await?;
    Ok(Json(result))
}

pub async fn expenses_by_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<CategoryTotal>>> {
    let ctx = user.context();
    authorize(&ctx, query.establishment_id)?;
    let range = DateRange::parse(&query.from, &query.to)?;
    let result =
        analytics::expenses_by_category(state.pool(), query.establishment_id, range).await?;
    Ok(Json(result))
}
