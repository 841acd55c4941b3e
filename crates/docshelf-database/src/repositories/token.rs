//! Refresh token blacklist repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::result::AppResult;
use docshelf_entity::token::BlacklistedToken;

/// Repository for consumed and revoked refresh tokens.
#[derive(Debug, Clone)]
pub struct TokenBlacklistRepository {
    pool: SqlitePool,
}

impl TokenBlacklistRepository {
    /// Create a new blacklist repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a `jti`. Returns `false` if it was already blacklisted.
    ///
    /// The primary key makes this the single point where a refresh token
    /// is consumed: of two concurrent refreshes only one insert succeeds.
    pub async fn insert(
        &self,
        jti: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        sqlx::query(
            "INSERT INTO token_blacklist (jti, user_id, expires_at, blacklisted_at) \
             VALUES (?, ?, ?, ?) ON CONFLICT (jti) DO NOTHING",
        )
        .bind(jti)
        .bind(user_id)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected() > 0)
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to blacklist token", e))
    }

    /// Whether a `jti` has been blacklisted.
    pub async fn is_blacklisted(&self, jti: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM token_blacklist WHERE jti = ?)")
            .bind(jti)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check token blacklist", e)
            })
    }

    /// Look up a blacklist entry.
    pub async fn find(&self, jti: &str) -> AppResult<Option<BlacklistedToken>> {
        sqlx::query_as::<_, BlacklistedToken>("SELECT * FROM token_blacklist WHERE jti = ?")
            .bind(jti)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load blacklisted token", e)
            })
    }

    /// Remove entries whose token has expired anyway. Returns rows deleted.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        sqlx::query("DELETE FROM token_blacklist WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge token blacklist", e)
            })
    }
}
