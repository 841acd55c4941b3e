//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::SqlitePool;

use docshelf_auth::{PasswordHasher, PasswordValidator, TokenService};
use docshelf_cache::CacheManager;
use docshelf_core::config::AppConfig;
use docshelf_core::result::AppResult;
use docshelf_database::repositories::{
    BlockRepository, DocumentRepository, LikeRepository, TokenBlacklistRepository, UserRepository,
};
use docshelf_service::{AuthService, BlockService, DocumentService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// SQLite connection pool
    pub db_pool: SqlitePool,
    /// Cache manager (Redis or in-memory)
    pub cache: Arc<CacheManager>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login, and token lifecycle
    pub auth_service: Arc<AuthService>,
    /// Documents and likes
    pub document_service: Arc<DocumentService>,
    /// Document blocks
    pub block_service: Arc<BlockService>,
}

impl AppState {
    /// Wire repositories and services over an already migrated pool.
    pub async fn build(config: AppConfig, db_pool: SqlitePool) -> AppResult<Self> {
        let cache = Arc::new(CacheManager::new(&config.cache).await?);
        Ok(Self::with_cache(config, db_pool, cache))
    }

    /// Like [`AppState::build`] with an explicit cache.
    pub fn with_cache(config: AppConfig, db_pool: SqlitePool, cache: Arc<CacheManager>) -> Self {
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let document_repo = Arc::new(DocumentRepository::new(db_pool.clone()));
        let block_repo = Arc::new(BlockRepository::new(db_pool.clone()));
        let like_repo = Arc::new(LikeRepository::new(db_pool.clone()));

        let token_service = Arc::new(TokenService::new(
            &config.auth,
            (*user_repo).clone(),
            TokenBlacklistRepository::new(db_pool.clone()),
        ));
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repo),
            token_service,
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config.auth)),
        ));
        let document_service = Arc::new(DocumentService::new(
            Arc::clone(&document_repo),
            Arc::clone(&block_repo),
            like_repo,
            &config.documents,
        ));
        let block_service = Arc::new(BlockService::new(document_repo, block_repo));

        Self {
            config: Arc::new(config),
            db_pool,
            cache,
            auth_service,
            document_service,
            block_service,
        }
    }
}
