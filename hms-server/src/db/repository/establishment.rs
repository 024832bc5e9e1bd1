//! Establishment repository

use super::RepoResult;
use shared::models::{Establishment, EstablishmentCreate, EstablishmentUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Establishment>> {
    let row = sqlx::query_as::<_, Establishment>(
        "SELECT id, name, city, address, phone, email, pricing_mode, manager_id, is_active, created_at, updated_at FROM establishment WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// All active establishments, name order. Backs the cached listing.
pub async fn find_active(pool: &SqlitePool) -> RepoResult<Vec<Establishment>> {
    let rows = sqlx::query_as::<_, Establishment>(
        "SELECT id, name, city, address, phone, email, pricing_mode, manager_id, is_active, created_at, updated_at FROM establishment WHERE is_active = 1 ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// One page of establishments plus the total count. `scope` restricts to a
/// single establishment when set.
pub async fn find_page(
    pool: &SqlitePool,
    scope: Option<i64>,
    limit: i64,
    offset: i64,
) -> RepoResult<(Vec<Establishment>, i64)> {
    let rows = sqlx::query_as::<_, Establishment>(
        "SELECT id, name, city, address, phone, email, pricing_mode, manager_id, is_active, created_at, updated_at FROM establishment WHERE (?1 IS NULL OR id = ?1) ORDER BY name LIMIT ?2 OFFSET ?3",
    )
    .bind(scope)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM establishment WHERE (?1 IS NULL OR id = ?1)",
    )
    .bind(scope)
    .fetch_one(pool)
    .await?;

    Ok((rows, total))
}

pub async fn create(pool: &SqlitePool, data: &EstablishmentCreate) -> RepoResult<Establishment> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO establishment (id, name, city, address, phone, email, pricing_mode, manager_id, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.city)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(data.pricing_mode)
    .bind(data.manager_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| super::RepoError::Database("Failed to create establishment".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &EstablishmentUpdate,
) -> RepoResult<Option<Establishment>> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE establishment SET name = COALESCE(?, name), city = COALESCE(?, city), address = COALESCE(?, address), phone = COALESCE(?, phone), email = COALESCE(?, email), pricing_mode = COALESCE(?, pricing_mode), manager_id = COALESCE(?, manager_id), is_active = COALESCE(?, is_active), updated_at = ? WHERE id = ?",
    )
    .bind(&data.name)
    .bind(&data.city)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(data.pricing_mode)
    .bind(data.manager_id)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM establishment WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
