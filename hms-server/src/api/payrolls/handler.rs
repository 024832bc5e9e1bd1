//! Payroll API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::payroll;
use shared::models::{Payroll, PayrollCreate, PayrollSummary};
use shared::{AppResult, PageQuery, Paginated};

#[derive(Debug, Deserialize)]
pub struct PayrollListQuery {
    pub establishment_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub year: Option<i32>,
    pub month: Option<i32>,
}

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(filter): Query<PayrollListQuery>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Paginated<Payroll>>> {
    let ctx = user.context();
    let result = payroll::list(
        state.pool(),
        &ctx,
        filter.establishment_id,
        filter.employee_id,
        filter.year,
        filter.month,
        &page,
    )
    .await?;
    Ok(Json(result))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Payroll>> {
    let ctx = user.context();
    let result = payroll::get(state.pool(), &ctx, id).await?;
    Ok(Json(result))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PayrollCreate>,
) -> AppResult<Json<Payroll>> {
    let ctx = user.context();
    let result = payroll::create(state.pool(), &ctx, payload).await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct GeneratePayload {
    pub year: i32,
    pub month: i32,
    pub establishment_id: Option<i64>,
}

/// Bulk-generate draft payrolls for every active employee in scope.
pub async fn generate(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<GeneratePayload>,
) -> AppResult<Json<Vec<Payroll>>> {
    let ctx = user.context();
    let result = payroll::generate_for_all(
        state.pool(),
        &ctx,
        payload.year,
        payload.month,
        payload.establishment_id,
    )
    .await?;
    Ok(Json(result))
}

pub async fn approve(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Payroll>> {
    let ctx = user.context();
    let result = payroll::approve(state.pool(), &ctx, id).await?;
    Ok(Json(result))
}

pub async fn mark_paid(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Payroll>> {
    let ctx = user.context();
    let result = payroll::mark_paid(state.pool(), &ctx, id).await?;
    Ok(Json(result))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let ctx = user.context();
    payroll::delete(state.pool(), &ctx, id).await?;
    Ok(Json(true))
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub year: i32,
    pub month: i32,
    pub establishment_id: Option<i64>,
}

pub async fn summary(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<PayrollSummary>> {
    let ctx = user.context();
    let result = payroll::summary(
        state.pool(),
        &ctx,
        query.year,
        query.month,
        query.establishment_id,
    )
    .await?;
    Ok(Json(result))
}
