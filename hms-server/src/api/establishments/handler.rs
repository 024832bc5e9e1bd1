//! Establishment API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::establishment;
use shared::models::{Establishment, EstablishmentCreate, EstablishmentUpdate};
use shared::{AppResult, PageQuery, Paginated};

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Paginated<Establishment>>> {
    let ctx = user.context();
    let result = establishment::list(state.pool(), &ctx, &page).await?;
    Ok(Json(result))
}

/// Active establishments, served through the TTL listing cache.
pub async fn list_active(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Establishment>>> {
    let ctx = user.context();
    let result = establishment::list_active(state.pool(), &ctx, &state.listing_cache).await?;
    Ok(Json(result))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Establishment>> {
    let ctx = user.context();
    let result = establishment::get(state.pool(), &ctx, id).await?;
    Ok(Json(result))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EstablishmentCreate>,
) -> AppResult<Json<Establishment>> {
    let result = establishment::create(state.pool(), payload).await?;
    Ok(Json(result))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<EstablishmentUpdate>,
) -> AppResult<Json<Establishment>> {
    let ctx = user.context();
    let result = establishment::update(state.pool(), &ctx, id, payload).await?;
    Ok(Json(result))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let ctx = user.context();
    establishment::delete(state.pool(), &ctx, id).await?;
    Ok(Json(true))
}
