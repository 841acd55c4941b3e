//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use docshelf_entity::document::{BlockType, OrderUpdate};
use docshelf_service::block::BlockInput;
use docshelf_service::document::{CreateDocumentInput, UpdateDocumentInput};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 150, message = "Username is required and at most 150 characters"))]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Refresh body for clients that cannot hold cookies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

/// Document create body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDocumentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub slug: Option<String>,
    pub is_published: Option<bool>,
    pub order: Option<i32>,
}

impl From<CreateDocumentRequest> for CreateDocumentInput {
    fn from(req: CreateDocumentRequest) -> Self {
        Self {
            title: req.title,
            slug: req.slug,
            is_published: req.is_published,
            order: req.order,
        }
    }
}

/// Document update body; used for both PUT and PATCH. A `slug` field, if
/// sent, is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateDocumentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub is_published: Option<bool>,
    pub order: Option<i32>,
}

impl From<UpdateDocumentRequest> for UpdateDocumentInput {
    fn from(req: UpdateDocumentRequest) -> Self {
        Self {
            title: req.title,
            is_published: req.is_published,
            order: req.order,
        }
    }
}

/// Reorder body. A missing `items` is an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReorderRequest {
    #[serde(default)]
    pub items: Vec<OrderUpdate>,
}

/// Block create and update body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BlockRequest {
    pub block_type: Option<BlockType>,
    pub content: Option<String>,
    #[validate(length(max = 50))]
    pub language: Option<String>,
    pub order: Option<i32>,
}

impl From<BlockRequest> for BlockInput {
    fn from(req: BlockRequest) -> Self {
        Self {
            block_type: req.block_type,
            content: req.content,
            language: req.language,
            order: req.order,
        }
    }
}
