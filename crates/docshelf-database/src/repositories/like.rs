//! Like repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;

use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::result::AppResult;
use docshelf_entity::document::LikeToggle;

/// Repository for the `(user, document)` like relation.
#[derive(Debug, Clone)]
pub struct LikeRepository {
    pool: SqlitePool,
}

impl LikeRepository {
    /// Create a new like repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Flip the like state for a pair.
    ///
    /// The insert relies on the UNIQUE `(user_id, document_id)` constraint,
    /// so two racing toggles can never leave two rows behind.
    pub async fn toggle(&self, user_id: i64, document_id: i64) -> AppResult<LikeToggle> {
        let inserted = sqlx::query(
            "INSERT INTO likes (user_id, document_id, created_at) VALUES (?, ?, ?) \
             ON CONFLICT (user_id, document_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(document_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert like", e))?
        .rows_affected();

        if inserted > 0 {
            return Ok(LikeToggle::Liked);
        }

        sqlx::query("DELETE FROM likes WHERE user_id = ? AND document_id = ?")
            .bind(user_id)
            .bind(document_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete like", e))?;

        Ok(LikeToggle::Unliked)
    }

    /// Whether the user has liked the document.
    pub async fn exists(&self, user_id: i64, document_id: i64) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = ? AND document_id = ?)",
        )
        .bind(user_id)
        .bind(document_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check like", e))
    }
}
