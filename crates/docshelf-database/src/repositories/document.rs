//! Document repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;

use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::result::AppResult;
use docshelf_entity::document::{CreateDocument, Document, DocumentSummary, UpdateDocument};

use super::is_unique_violation;

const SELECT_DOCUMENT: &str = "\
    SELECT d.id, d.title, d.slug, d.author_id, u.username AS author_username, \
           d.is_published, d.sort_order, d.created_at, d.updated_at, \
           (SELECT COUNT(*) FROM likes l WHERE l.document_id = d.id) AS likes_count \
    FROM documents d \
    JOIN users u ON u.id = d.author_id";

/// Repository for documents and their list/detail projections.
///
/// Every read takes `include_unpublished`; callers pass `true` only for
/// admins, which is how the visibility rule reaches the query.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List visible documents ordered by `(order ASC, created_at DESC)`.
    pub async fn list(&self, include_unpublished: bool) -> AppResult<Vec<DocumentSummary>> {
        sqlx::query_as::<_, DocumentSummary>(
            "SELECT d.id, d.title, d.slug, u.username AS author_username, d.is_published, \
                    d.sort_order, \
                    (SELECT COUNT(*) FROM likes l WHERE l.document_id = d.id) AS likes_count \
             FROM documents d \
             JOIN users u ON u.id = d.author_id \
             WHERE ? OR d.is_published = 1 \
             ORDER BY d.sort_order ASC, d.created_at DESC, d.id DESC",
        )
        .bind(include_unpublished)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    /// Find a visible document by slug.
    pub async fn find_by_slug(
        &self,
        slug: &str,
        include_unpublished: bool,
    ) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>(&format!(
            "{SELECT_DOCUMENT} WHERE d.slug = ? AND (? OR d.is_published = 1)"
        ))
        .bind(slug)
        .bind(include_unpublished)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find document by slug", e)
        })
    }

    /// Find a document by primary key regardless of publication state.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>(&format!("{SELECT_DOCUMENT} WHERE d.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find document by id", e)
            })
    }

    /// Insert a new document.
    pub async fn create(&self, data: &CreateDocument) -> AppResult<Document> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO documents (title, slug, author_id, is_published, sort_order, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&data.title)
        .bind(&data.slug)
        .bind(data.author_id)
        .bind(data.is_published)
        .bind(data.order)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::validation("A document with this slug already exists")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create document", e)
            }
        })?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Created document disappeared"))
    }

    /// Apply a partial update. The slug is never touched.
    ///
    /// Returns `None` if the document does not exist.
    pub async fn update(&self, id: i64, data: &UpdateDocument) -> AppResult<Option<Document>> {
        let result = sqlx::query(
            "UPDATE documents SET \
                title = COALESCE(?, title), \
                is_published = COALESCE(?, is_published), \
                sort_order = COALESCE(?, sort_order), \
                updated_at = ? \
             WHERE id = ?",
        )
        .bind(data.title.as_deref())
        .bind(data.is_published)
        .bind(data.order)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update document", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    /// Delete a document; blocks and likes cascade. Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete document", e))
    }

    /// Set a single document's sort key. Returns the number of rows changed.
    pub async fn set_order(&self, id: i64, order: i32) -> AppResult<u64> {
        sqlx::query("UPDATE documents SET sort_order = ? WHERE id = ?")
            .bind(order)
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to reorder document", e)
            })
    }
}
