//! Employee API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::employee;
use shared::models::{Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate};
use shared::{AppResult, PageQuery, Paginated};

#[derive(Debug, Deserialize)]
pub struct EmployeeListQuery {
    pub establishment_id: Option<i64>,
    pub status: Option<EmployeeStatus>,
}

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(filter): Query<EmployeeListQuery>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Paginated<Employee>>> {
    let ctx = user.context();
    let result = employee::list(
        state.pool(),
        &ctx,
        filter.establishment_id,
        filter.status,
        &page,
    )
    .await?;
    Ok(Json(result))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Employee>> {
    let ctx = user.context();
    let result = employee::get(state.pool(), &ctx, id).await?;
    Ok(Json(result))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<Employee>> {
    let ctx = user.context();
    let result = employee::create(state.pool(), &ctx, payload).await?;
    Ok(Json(result))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    let ctx = user.context();
    let result = employee::update(state.pool(), &ctx, id, payload).await?;
    Ok(Json(result))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let ctx = user.context();
    employee::delete(state.pool(), &ctx, id).await?;
    Ok(Json(true))
}
