//! Document block entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Content kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Prose.
    Text,
    /// Source code; `language` names the highlighter.
    Code,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Code => write!(f, "code"),
        }
    }
}

/// An ordered content unit belonging to one document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentBlock {
    pub id: i64,
    #[serde(skip_serializing)]
    pub document_id: i64,
    pub block_type: BlockType,
    pub content: String,
    /// Highlighter name for code blocks, empty otherwise.
    pub language: String,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
}

/// Data required to insert a block.
#[derive(Debug, Clone)]
pub struct CreateBlock {
    pub document_id: i64,
    pub block_type: BlockType,
    pub content: String,
    pub language: String,
    pub order: i32,
}

/// Full replacement of a block's mutable fields.
#[derive(Debug, Clone)]
pub struct UpdateBlock {
    pub block_type: BlockType,
    pub content: String,
    pub language: String,
    pub order: i32,
}
