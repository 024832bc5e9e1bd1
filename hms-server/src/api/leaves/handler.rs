//! Leave API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::leave;
use crate::utils::time;
use shared::models::{Leave, LeaveBalance, LeaveCreate, LeaveFilter, LeaveSummary};
use shared::{AppResult, PageQuery, Paginated};

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(filter): Query<LeaveFilter>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Paginated<Leave>>> {
    let ctx = user.context();
    let result = leave::list(state.pool(), &ctx, &filter, &page).await?;
    Ok(Json(result))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Leave>> {
    let ctx = user.context();
    let result = leave::get(state.pool(), &ctx, id).await?;
    Ok(Json(result))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<LeaveCreate>,
) -> AppResult<Json<Leave>> {
    let ctx = user.context();
    let result = leave::create(state.pool(), &ctx, payload).await?;
    Ok(Json(result))
}

pub async fn approve(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Leave>> {
    let ctx = user.context();
    let result = leave::approve(state.pool(), &ctx, id, user.id).await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct RejectPayload {
    pub reason: String,
}

pub async fn reject(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RejectPayload>,
) -> AppResult<Json<Leave>> {
    let ctx = user.context();
    let result = leave::reject(state.pool(), &ctx, id, user.id, &payload.reason).await?;
    Ok(Json(result))
}

pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Leave>> {
    let ctx = user.context();
    let result = leave::cancel(state.pool(), &ctx, id).await?;
    Ok(Json(result))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let ctx = user.context();
    leave::delete(state.pool(), &ctx, id).await?;
    Ok(Json(true))
}

#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    pub year: Option<i32>,
}

/// Annual balance for an employee; the year defaults to the current one in
/// the business timezone.
pub async fn balance(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(employee_id): Path<i64>,
    Query(query): Query<BalanceQuery>,
) -> AppResult<Json<LeaveBalance>> {
    let ctx = user.context();
    let year = query
        .year
        .unwrap_or_else(|| time::current_year(state.config.timezone));
    let result = leave::balance(state.pool(), &ctx, employee_id, year).await?;
    Ok(Json(result))
}

pub async fn summary(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(filter): Query<LeaveFilter>,
) -> AppResult<Json<LeaveSummary>> {
    let ctx = user.context();
    let result = leave::summary(state.pool(), &ctx, &filter).await?;
    Ok(Json(result))
}
