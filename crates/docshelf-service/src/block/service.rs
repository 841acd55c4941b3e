//! Block service. Every operation is admin-only and scoped to a parent
//! document id.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use docshelf_auth::{DocumentAction, DocumentPolicy};
use docshelf_core::error::AppError;
use docshelf_core::result::AppResult;
use docshelf_database::repositories::{BlockRepository, DocumentRepository};
use docshelf_entity::document::{BlockType, CreateBlock, DocumentBlock, OrderUpdate, UpdateBlock};

use crate::context::RequestContext;

/// Maximum language tag length.
pub const LANGUAGE_MAX_LENGTH: usize = 50;

/// Fields accepted on block create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockInput {
    pub block_type: Option<BlockType>,
    pub content: Option<String>,
    pub language: Option<String>,
    pub order: Option<i32>,
}

/// Block use cases.
#[derive(Debug, Clone)]
pub struct BlockService {
    documents: Arc<DocumentRepository>,
    blocks: Arc<BlockRepository>,
    // Blocks are never readable anonymously, so the read flag is irrelevant.
    policy: DocumentPolicy,
}

impl BlockService {
    /// Creates a new block service.
    pub fn new(documents: Arc<DocumentRepository>, blocks: Arc<BlockRepository>) -> Self {
        Self {
            documents,
            blocks,
            policy: DocumentPolicy::new(false),
        }
    }

    /// Blocks of a document ordered by `(order, id)`.
    pub async fn list(&self, ctx: &RequestContext, document_id: i64) -> AppResult<Vec<DocumentBlock>> {
        self.guard(ctx, document_id).await?;
        self.blocks.find_by_document(document_id).await
    }

    /// Append a block to a document.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        document_id: i64,
        input: BlockInput,
    ) -> AppResult<DocumentBlock> {
        self.guard(ctx, document_id).await?;
        let (block_type, content) = required_fields(&input)?;
        let language = input.language.unwrap_or_default();
        validate_language(&language)?;

        let block = self
            .blocks
            .create(&CreateBlock {
                document_id,
                block_type,
                content,
                language,
                order: input.order.unwrap_or(0),
            })
            .await?;
        info!(user_id = ctx.user_id, document_id, block_id = block.id, "Block created");
        Ok(block)
    }

    /// A single block of a document.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        document_id: i64,
        block_id: i64,
    ) -> AppResult<DocumentBlock> {
        self.guard(ctx, document_id).await?;
        self.find(document_id, block_id).await
    }

    /// Replace a block. `block_type` and `content` are required; an omitted
    /// `language` or `order` keeps its current value.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        document_id: i64,
        block_id: i64,
        input: BlockInput,
    ) -> AppResult<DocumentBlock> {
        self.guard(ctx, document_id).await?;
        let existing = self.find(document_id, block_id).await?;
        let (block_type, content) = required_fields(&input)?;
        let language = input.language.unwrap_or(existing.language);
        validate_language(&language)?;

        let block = self
            .blocks
            .update(
                document_id,
                block_id,
                &UpdateBlock {
                    block_type,
                    content,
                    language,
                    order: input.order.unwrap_or(existing.order),
                },
            )
            .await?
            .ok_or_else(block_not_found)?;
        info!(user_id = ctx.user_id, document_id, block_id, "Block updated");
        Ok(block)
    }

    /// Remove a block.
    pub async fn delete(&self, ctx: &RequestContext, document_id: i64, block_id: i64) -> AppResult<()> {
        self.guard(ctx, document_id).await?;
        if !self.blocks.delete(document_id, block_id).await? {
            return Err(block_not_found());
        }
        info!(user_id = ctx.user_id, document_id, block_id, "Block deleted");
        Ok(())
    }

    /// Apply `(id, order)` pairs to blocks of this document only; ids of
    /// other documents' blocks are ignored.
    pub async fn reorder(
        &self,
        ctx: &RequestContext,
        document_id: i64,
        items: &[OrderUpdate],
    ) -> AppResult<()> {
        self.guard(ctx, document_id).await?;
        let mut applied = 0u64;
        for item in items {
            applied += self.blocks.set_order(document_id, item.id, item.order).await?;
        }
        info!(user_id = ctx.user_id, document_id, applied, "Blocks reordered");
        Ok(())
    }

    async fn guard(&self, ctx: &RequestContext, document_id: i64) -> AppResult<()> {
        self.policy
            .authorize(Some(ctx.role), DocumentAction::ManageBlocks)?;
        self.documents
            .find_by_id(document_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Document not found"))
    }

    async fn find(&self, document_id: i64, block_id: i64) -> AppResult<DocumentBlock> {
        self.blocks
            .find(document_id, block_id)
            .await?
            .ok_or_else(block_not_found)
    }
}

fn required_fields(input: &BlockInput) -> Result<(BlockType, String), AppError> {
    let block_type = input
        .block_type
        .ok_or_else(|| AppError::validation("Block type is required."))?;
    let content = input
        .content
        .clone()
        .ok_or_else(|| AppError::validation("Content is required."))?;
    if content.trim().is_empty() {
        return Err(AppError::validation("Content must not be blank."));
    }
    Ok((block_type, content))
}

fn validate_language(language: &str) -> Result<(), AppError> {
    if language.chars().count() > LANGUAGE_MAX_LENGTH {
        return Err(AppError::validation(format!(
            "Ensure the language has no more than {LANGUAGE_MAX_LENGTH} characters."
        )));
    }
    Ok(())
}

fn block_not_found() -> AppError {
    AppError::not_found("Block not found")
}
