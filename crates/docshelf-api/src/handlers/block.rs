//! Block handlers, nested under a document id.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use docshelf_entity::document::DocumentBlock;

use crate::dto::request::{BlockRequest, ReorderRequest};
use crate::dto::response::StatusResponse;
use crate::error::ApiError;
use crate::extractors::path::parse_id;
use crate::extractors::{AdminUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/docs/documents/{document}/blocks
pub async fn list_blocks(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(document): Path<String>,
) -> Result<Json<Vec<DocumentBlock>>, ApiError> {
    let document_id = parse_id(&document, "Document")?;
    let blocks = state.block_service.list(&admin, document_id).await?;
    Ok(Json(blocks))
}

/// POST /api/docs/documents/{document}/blocks
pub async fn create_block(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(document): Path<String>,
    ValidatedJson(req): ValidatedJson<BlockRequest>,
) -> Result<(StatusCode, Json<DocumentBlock>), ApiError> {
    let document_id = parse_id(&document, "Document")?;
    let block = state
        .block_service
        .create(&admin, document_id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(block)))
}

/// GET /api/docs/documents/{document}/blocks/{block}
pub async fn get_block(
    State(state): State<AppState>,
    admin: AdminUser,
    Path((document, block)): Path<(String, String)>,
) -> Result<Json<DocumentBlock>, ApiError> {
    let (document_id, block_id) = ids(&document, &block)?;
    let block = state
        .block_service
        .get(&admin, document_id, block_id)
        .await?;
    Ok(Json(block))
}

/// PUT /api/docs/documents/{document}/blocks/{block}
pub async fn update_block(
    State(state): State<AppState>,
    admin: AdminUser,
    Path((document, block)): Path<(String, String)>,
    ValidatedJson(req): ValidatedJson<BlockRequest>,
) -> Result<Json<DocumentBlock>, ApiError> {
    let (document_id, block_id) = ids(&document, &block)?;
    let block = state
        .block_service
        .update(&admin, document_id, block_id, req.into())
        .await?;
    Ok(Json(block))
}

/// DELETE /api/docs/documents/{document}/blocks/{block}
pub async fn delete_block(
    State(state): State<AppState>,
    admin: AdminUser,
    Path((document, block)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let (document_id, block_id) = ids(&document, &block)?;
    state
        .block_service
        .delete(&admin, document_id, block_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/docs/documents/{document}/blocks/reorder
pub async fn reorder_blocks(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(document): Path<String>,
    ValidatedJson(req): ValidatedJson<ReorderRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let document_id = parse_id(&document, "Document")?;
    state
        .block_service
        .reorder(&admin, document_id, &req.items)
        .await?;
    Ok(Json(StatusResponse {
        status: "reordered".to_string(),
    }))
}

fn ids(document: &str, block: &str) -> Result<(i64, i64), ApiError> {
    Ok((parse_id(document, "Document")?, parse_id(block, "Block")?))
}
