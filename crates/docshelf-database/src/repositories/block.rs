//! Document block repository implementation.

use sqlx::SqlitePool;

use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::result::AppResult;
use docshelf_entity::document::{CreateBlock, DocumentBlock, UpdateBlock};

/// Repository for blocks. Every lookup is scoped to the parent document.
#[derive(Debug, Clone)]
pub struct BlockRepository {
    pool: SqlitePool,
}

impl BlockRepository {
    /// Create a new block repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All blocks of a document ordered by `(order, id)`.
    pub async fn find_by_document(&self, document_id: i64) -> AppResult<Vec<DocumentBlock>> {
        sqlx::query_as::<_, DocumentBlock>(
            "SELECT * FROM document_blocks WHERE document_id = ? ORDER BY sort_order ASC, id ASC",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list blocks", e))
    }

    /// Find one block of a document.
    pub async fn find(&self, document_id: i64, block_id: i64) -> AppResult<Option<DocumentBlock>> {
        sqlx::query_as::<_, DocumentBlock>(
            "SELECT * FROM document_blocks WHERE document_id = ? AND id = ?",
        )
        .bind(document_id)
        .bind(block_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find block", e))
    }

    /// Insert a new block.
    pub async fn create(&self, data: &CreateBlock) -> AppResult<DocumentBlock> {
        sqlx::query_as::<_, DocumentBlock>(
            "INSERT INTO document_blocks (document_id, block_type, content, language, sort_order) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(data.document_id)
        .bind(data.block_type)
        .bind(&data.content)
        .bind(&data.language)
        .bind(data.order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create block", e))
    }

    /// Replace a block's fields. Returns `None` if the block is not part of the document.
    pub async fn update(
        &self,
        document_id: i64,
        block_id: i64,
        data: &UpdateBlock,
    ) -> AppResult<Option<DocumentBlock>> {
        sqlx::query_as::<_, DocumentBlock>(
            "UPDATE document_blocks \
             SET block_type = ?, content = ?, language = ?, sort_order = ? \
             WHERE document_id = ? AND id = ? RETURNING *",
        )
        .bind(data.block_type)
        .bind(&data.content)
        .bind(&data.language)
        .bind(data.order)
        .bind(document_id)
        .bind(block_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update block", e))
    }

    /// Delete a block. Returns whether a row was removed.
    pub async fn delete(&self, document_id: i64, block_id: i64) -> AppResult<bool> {
        sqlx::query("DELETE FROM document_blocks WHERE document_id = ? AND id = ?")
            .bind(document_id)
            .bind(block_id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete block", e))
    }

    /// Set one block's sort key within its document. Returns rows changed.
    pub async fn set_order(&self, document_id: i64, block_id: i64, order: i32) -> AppResult<u64> {
        sqlx::query("UPDATE document_blocks SET sort_order = ? WHERE document_id = ? AND id = ?")
            .bind(order)
            .bind(document_id)
            .bind(block_id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reorder block", e))
    }
}
