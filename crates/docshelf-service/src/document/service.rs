//! Document service: listing, detail, admin writes, likes, and reorder.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use docshelf_auth::{DocumentAction, DocumentPolicy};
use docshelf_core::config::documents::DocumentsConfig;
use docshelf_core::error::AppError;
use docshelf_core::result::AppResult;
use docshelf_database::repositories::{BlockRepository, DocumentRepository, LikeRepository};
use docshelf_entity::document::{
    CreateDocument, Document, DocumentDetail, DocumentSummary, LikeToggle, OrderUpdate,
    UpdateDocument,
};

use super::slug::{slugify, validate_slug};
use crate::context::{RequestContext, role_of};

/// Maximum title length in characters.
pub const TITLE_MAX_LENGTH: usize = 200;

/// Fields accepted when creating a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDocumentInput {
    pub title: Option<String>,
    /// Derived from the title when omitted.
    pub slug: Option<String>,
    pub is_published: Option<bool>,
    pub order: Option<i32>,
}

/// Fields accepted when updating a document. The slug is not updatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDocumentInput {
    pub title: Option<String>,
    pub is_published: Option<bool>,
    pub order: Option<i32>,
}

/// Document use cases.
#[derive(Debug, Clone)]
pub struct DocumentService {
    documents: Arc<DocumentRepository>,
    blocks: Arc<BlockRepository>,
    likes: Arc<LikeRepository>,
    policy: DocumentPolicy,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        documents: Arc<DocumentRepository>,
        blocks: Arc<BlockRepository>,
        likes: Arc<LikeRepository>,
        config: &DocumentsConfig,
    ) -> Self {
        Self {
            documents,
            blocks,
            likes,
            policy: DocumentPolicy::new(config.allow_anonymous_read),
        }
    }

    /// Documents visible to the caller, in list order.
    pub async fn list(&self, ctx: Option<&RequestContext>) -> AppResult<Vec<DocumentSummary>> {
        let role = role_of(ctx);
        self.policy.authorize(role, DocumentAction::Read)?;
        self.documents
            .list(DocumentPolicy::sees_unpublished(role))
            .await
    }

    /// Full projection of a visible document.
    pub async fn get(&self, ctx: Option<&RequestContext>, slug: &str) -> AppResult<DocumentDetail> {
        let role = role_of(ctx);
        self.policy.authorize(role, DocumentAction::Read)?;
        let document = self.find_visible(ctx, slug).await?;
        self.detail(ctx, document).await
    }

    /// Create a document authored by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateDocumentInput,
    ) -> AppResult<DocumentDetail> {
        self.policy.authorize(Some(ctx.role), DocumentAction::Write)?;

        let title = input
            .title
            .ok_or_else(|| AppError::validation("Title is required."))?;
        validate_title(&title)?;

        let slug = match input.slug {
            Some(slug) => {
                validate_slug(&slug)?;
                slug
            }
            None => {
                let derived = slugify(&title);
                if derived.is_empty() {
                    return Err(AppError::validation(
                        "Could not derive a slug from the title; provide one explicitly.",
                    ));
                }
                derived
            }
        };

        let document = self
            .documents
            .create(&CreateDocument {
                title,
                slug,
                author_id: ctx.user_id,
                is_published: input.is_published.unwrap_or(false),
                order: input.order.unwrap_or(0),
            })
            .await?;

        info!(
            user_id = ctx.user_id,
            document_id = document.id,
            slug = %document.slug,
            "Document created"
        );
        self.detail(Some(ctx), document).await
    }

    /// Update a document. With `partial == false` the title is required.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        slug: &str,
        input: UpdateDocumentInput,
        partial: bool,
    ) -> AppResult<DocumentDetail> {
        self.policy.authorize(Some(ctx.role), DocumentAction::Write)?;
        let existing = self.find_visible(Some(ctx), slug).await?;

        if !partial && input.title.is_none() {
            return Err(AppError::validation("Title is required."));
        }
        if let Some(title) = &input.title {
            validate_title(title)?;
        }

        let updated = self
            .documents
            .update(
                existing.id,
                &UpdateDocument {
                    title: input.title,
                    is_published: input.is_published,
                    order: input.order,
                },
            )
            .await?
            .ok_or_else(document_not_found)?;

        info!(user_id = ctx.user_id, document_id = updated.id, "Document updated");
        self.detail(Some(ctx), updated).await
    }

    /// Delete a document along with its blocks and likes.
    pub async fn delete(&self, ctx: &RequestContext, slug: &str) -> AppResult<()> {
        self.policy.authorize(Some(ctx.role), DocumentAction::Write)?;
        let existing = self.find_visible(Some(ctx), slug).await?;

        if !self.documents.delete(existing.id).await? {
            return Err(document_not_found());
        }
        info!(user_id = ctx.user_id, document_id = existing.id, "Document deleted");
        Ok(())
    }

    /// Toggle the caller's like on a visible document.
    pub async fn like(&self, ctx: &RequestContext, slug: &str) -> AppResult<LikeToggle> {
        self.policy.authorize(Some(ctx.role), DocumentAction::Like)?;
        let document = self.find_visible(Some(ctx), slug).await?;

        let outcome = self.likes.toggle(ctx.user_id, document.id).await?;
        debug!(
            user_id = ctx.user_id,
            document_id = document.id,
            outcome = outcome.as_str(),
            "Like toggled"
        );
        Ok(outcome)
    }

    /// Apply `(id, order)` pairs one by one.
    ///
    /// Unknown ids are skipped. The first failing update aborts the rest;
    /// earlier updates stay applied.
    pub async fn reorder(&self, ctx: &RequestContext, items: &[OrderUpdate]) -> AppResult<()> {
        self.policy.authorize(Some(ctx.role), DocumentAction::Write)?;

        let mut applied = 0u64;
        for item in items {
            applied += self.documents.set_order(item.id, item.order).await?;
        }
        info!(
            user_id = ctx.user_id,
            requested = items.len(),
            applied,
            "Documents reordered"
        );
        Ok(())
    }

    async fn find_visible(&self, ctx: Option<&RequestContext>, slug: &str) -> AppResult<Document> {
        self.documents
            .find_by_slug(slug, DocumentPolicy::sees_unpublished(role_of(ctx)))
            .await?
            .ok_or_else(document_not_found)
    }

    async fn detail(
        &self,
        ctx: Option<&RequestContext>,
        document: Document,
    ) -> AppResult<DocumentDetail> {
        let blocks = self.blocks.find_by_document(document.id).await?;
        let is_liked = match ctx {
            Some(ctx) => self.likes.exists(ctx.user_id, document.id).await?,
            None => false,
        };
        Ok(DocumentDetail {
            document,
            blocks,
            is_liked,
        })
    }
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Title must not be blank."));
    }
    if title.chars().count() > TITLE_MAX_LENGTH {
        return Err(AppError::validation(format!(
            "Ensure the title has no more than {TITLE_MAX_LENGTH} characters."
        )));
    }
    Ok(())
}

fn document_not_found() -> AppError {
    AppError::not_found("Document not found")
}
