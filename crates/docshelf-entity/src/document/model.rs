//! Document entity model and projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::block::DocumentBlock;

/// A document row joined with its author's username and like count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: i64,
    /// Title, at most 200 characters.
    pub title: String,
    /// Unique URL slug. Fixed at creation.
    pub slug: String,
    /// Owning user.
    #[serde(rename = "author")]
    pub author_id: i64,
    /// Username of the owning user.
    pub author_username: String,
    /// Whether non-admin callers can see the document.
    pub is_published: bool,
    /// Manual sort key, ascending.
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
    /// Number of likes.
    pub likes_count: i64,
}

/// List projection, without timestamps or blocks.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentSummary {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub author_username: String,
    pub is_published: bool,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub likes_count: i64,
}

/// Full projection returned by detail and write endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDetail {
    #[serde(flatten)]
    pub document: Document,
    /// Blocks ordered by `(order, id)`.
    pub blocks: Vec<DocumentBlock>,
    /// Whether the requesting user has liked the document.
    pub is_liked: bool,
}

/// Data required to insert a document.
#[derive(Debug, Clone)]
pub struct CreateDocument {
    pub title: String,
    pub slug: String,
    pub author_id: i64,
    pub is_published: bool,
    pub order: i32,
}

/// Partial update of a document. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateDocument {
    pub title: Option<String>,
    pub is_published: Option<bool>,
    pub order: Option<i32>,
}

impl UpdateDocument {
    /// True when no column would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.is_published.is_none() && self.order.is_none()
    }
}

/// One `(id, order)` pair of a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub id: i64,
    pub order: i32,
}
