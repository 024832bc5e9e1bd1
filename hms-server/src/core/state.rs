use std::sync::Arc;
use std::time::Duration;

use shared::AppError;
use shared::models::Establishment;
use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::cache::TtlCache;
use crate::core::Config;
use crate::db::DbService;

/// TTL for the cached active-establishment listing.
///
/// Writers do not invalidate this cache; a freshly created or deactivated
/// establishment can be missing from (or linger in) the cached listing for
/// up to this long. Accepted staleness window.
pub const LISTING_CACHE_TTL: Duration = Duration::from_secs(600);

/// Shared server state handed to every handler.
///
/// Cloning is shallow: the pool and the `Arc`-held services are shared.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Database service (SQLite pool)
    pub db: DbService,
    /// JWT validation service
    pub jwt_service: Arc<JwtService>,
    /// TTL cache for the active-establishment listing
    pub listing_cache: Arc<TtlCache<Vec<Establishment>>>,
}

impl ServerState {
    /// Assemble state from already-constructed parts. Used by tests; the
    /// server binary goes through [`ServerState::initialize`].
    pub fn new(config: Config, db: DbService) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            jwt_service,
            listing_cache: Arc::new(TtlCache::new(LISTING_CACHE_TTL)),
        }
    }

    /// Create the working directory, open the database and run migrations.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            AppError::internal(format!(
                "Failed to create work dir {}: {e}",
                config.work_dir
            ))
        })?;

        let db = DbService::new(&config.db_path()).await?;
        Ok(Self::new(config.clone(), db))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
