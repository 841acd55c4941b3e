//! Like entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user's like on a document. At most one per `(user_id, document_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Like {
    pub id: i64,
    pub user_id: i64,
    pub document_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeToggle {
    /// A like row was created.
    Liked,
    /// The existing like row was removed.
    Unliked,
}

impl LikeToggle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Liked => "liked",
            Self::Unliked => "unliked",
        }
    }
}
