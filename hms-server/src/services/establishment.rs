//! Establishment service.
//!
//! The active listing is served through the state's TTL cache; scoped
//! callers see only their own establishment in every read path.

use shared::models::{Establishment, EstablishmentCreate, EstablishmentUpdate};
use shared::{ErrorCode, PageQuery, Paginated};
use sqlx::SqlitePool;
use validator::Validate;

use super::{ServiceError, ServiceResult, access};
use crate::auth::ServiceContext;
use crate::cache::TtlCache;
use crate::db::repository::{self, RepoError};

/// Cache key for the active-establishment listing.
const ACTIVE_LISTING_KEY: &str = "establishments:active";

pub async fn get(pool: &SqlitePool, ctx: &ServiceContext, id: i64) -> ServiceResult<Establishment> {
    let establishment = repository::establishment::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    access::require_access(ctx, "establishment", id, establishment.id)?;
    Ok(establishment)
}

pub async fn list(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    page: &PageQuery,
) -> ServiceResult<Paginated<Establishment>> {
    let (limit, offset) = page.limit_offset();
    let (rows, total) =
        repository::establishment::find_page(pool, ctx.scope(), limit, offset).await?;
    Ok(Paginated::new(rows, page.page.max(1), limit, total))
}

/// Active establishments, via the TTL cache. The cache holds the full
/// listing; the caller's scope filters the cached value, so scoped and
/// global callers share one entry.
pub async fn list_active(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    cache: &TtlCache<Vec<Establishment>>,
) -> ServiceResult<Vec<Establishment>> {
    let all = match cache.get(ACTIVE_LISTING_KEY) {
        Some(listing) => listing,
        None => {
            let listing = repository::establishment::find_active(pool).await?;
            cache.put(ACTIVE_LISTING_KEY, listing.clone());
            listing
        }
    };

    Ok(match ctx.scope() {
        None => all,
        Some(own) => all.into_iter().filter(|e| e.id == own).collect(),
    })
}

pub async fn create(
    pool: &SqlitePool,
    payload: EstablishmentCreate,
) -> ServiceResult<Establishment> {
    payload
        .validate()
        .map_err(|e| ServiceError::domain_msg(ErrorCode::ValidationFailed, e.to_string()))?;

    repository::establishment::create(pool, &payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => ServiceError::domain_msg(
                ErrorCode::EstablishmentNameExists,
                format!("Establishment name '{}' already exists", payload.name),
            ),
            other => other.into(),
        })
}

pub async fn update(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    id: i64,
    payload: EstablishmentUpdate,
) -> ServiceResult<Establishment> {
    payload
        .validate()
        .map_err(|e| ServiceError::domain_msg(ErrorCode::ValidationFailed, e.to_string()))?;
    let existing = repository::establishment::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    access::require_access(ctx, "establishment", id, existing.id)?;

    repository::establishment::update(pool, id, &payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => ServiceError::domain_msg(
                ErrorCode::EstablishmentNameExists,
                "Establishment name already exists",
            ),
            other => other.into(),
        })?
        .ok_or_else(|| not_found(id))
}

pub async fn delete(pool: &SqlitePool, ctx: &ServiceContext, id: i64) -> ServiceResult<()> {
    let existing = repository::establishment::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    access::require_access(ctx, "establishment", id, existing.id)?;
    repository::establishment::delete(pool, id).await?;
    Ok(())
}

fn not_found(id: i64) -> ServiceError {
    ServiceError::domain_msg(
        ErrorCode::EstablishmentNotFound,
        format!("Establishment {id} not found"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::services::test_support::{ctx_global, ctx_scoped, seed_establishment};
    use std::time::Duration;

    fn establishment_payload(name: &str) -> EstablishmentCreate {
        EstablishmentCreate {
            name: name.to_string(),
            city: "Valencia".to_string(),
            address: "Calle Mayor 1".to_string(),
            phone: None,
            email: None,
            pricing_mode: Default::default(),
            manager_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let pool = test_pool().await;
        let created = create(&pool, establishment_payload("Mar Azul")).await.unwrap();
        assert!(created.is_active);

        let fetched = get(&pool, &ctx_global(), created.id).await.unwrap();
        assert_eq!(fetched.name, "Mar Azul");
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let pool = test_pool().await;
        create(&pool, establishment_payload("Mar Azul")).await.unwrap();
        let err = create(&pool, establishment_payload("Mar Azul")).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain { code: ErrorCode::EstablishmentNameExists, .. }
        ));
    }

    #[tokio::test]
    async fn test_get_foreign_establishment_denied() {
        let pool = test_pool().await;
        let est_a = seed_establishment(&pool, "Mar Azul").await;
        let est_b = seed_establishment(&pool, "Sierra Alta").await;

        assert!(get(&pool, &ctx_scoped(est_a), est_a).await.is_ok());
        let err = get(&pool, &ctx_scoped(est_a), est_b).await.unwrap_err();
        assert!(matches!(err, ServiceError::EstablishmentAccessDenied { .. }));
    }

    #[tokio::test]
    async fn test_scoped_listing_shows_own_only() {
        let pool = test_pool().await;
        let est_a = seed_establishment(&pool, "Mar Azul").await;
        seed_establishment(&pool, "Sierra Alta").await;

        let page = list(&pool, &ctx_scoped(est_a), &PageQuery::default()).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, est_a);
        assert_eq!(page.pagination.total, 1);

        let page = list(&pool, &ctx_global(), &PageQuery::default()).await.unwrap();
        assert_eq!(page.data.len(), 2);
    }

    #[tokio::test]
    async fn test_active_listing_served_from_cache() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;
        let cache = TtlCache::new(Duration::from_secs(600));
        let ctx = ctx_global();

        let listing = list_active(&pool, &ctx, &cache).await.unwrap();
        assert_eq!(listing.len(), 1);

        // A write after the cache fill is invisible until the TTL lapses
        seed_establishment(&pool, "Sierra Alta").await;
        let listing = list_active(&pool, &ctx, &cache).await.unwrap();
        assert_eq!(listing.len(), 1, "stale listing expected within TTL");

        // Scoped callers filter the same cached entry
        let listing = list_active(&pool, &ctx_scoped(est), &cache).await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].id, est);
    }

    #[tokio::test]
    async fn test_active_listing_recomputed_after_expiry() {
        let pool = test_pool().await;
        seed_establishment(&pool, "Mar Azul").await;
        let cache = TtlCache::new(Duration::from_millis(1));
        let ctx = ctx_global();

        assert_eq!(list_active(&pool, &ctx, &cache).await.unwrap().len(), 1);
        seed_establishment(&pool, "Sierra Alta").await;
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(list_active(&pool, &ctx, &cache).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;
        let ctx = ctx_global();

        let updated = update(
            &pool,
            &ctx,
            est,
            EstablishmentUpdate {
                city: Some("Alicante".to_string()),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.city, "Alicante");
        assert!(!updated.is_active);

        delete(&pool, &ctx, est).await.unwrap();
        assert!(get(&pool, &ctx, est).await.is_err());
    }
}
