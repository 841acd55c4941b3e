//! Document handlers.
//!
//! Role extractors come before the body extractor, so permission errors
//! win over malformed payloads.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use docshelf_entity::document::{DocumentDetail, DocumentSummary, LikeToggle};

use crate::dto::request::{CreateDocumentRequest, ReorderRequest, UpdateDocumentRequest};
use crate::dto::response::StatusResponse;
use crate::error::ApiError;
use crate::extractors::{AdminUser, AuthUser, MaybeAuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/docs/documents
pub async fn list_documents(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
) -> Result<Json<Vec<DocumentSummary>>, ApiError> {
    let documents = state.document_service.list(caller.context()).await?;
    Ok(Json(documents))
}

/// GET /api/docs/documents/{slug}
pub async fn get_document(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(slug): Path<String>,
) -> Result<Json<DocumentDetail>, ApiError> {
    let document = state.document_service.get(caller.context(), &slug).await?;
    Ok(Json(document))
}

/// POST /api/docs/documents
pub async fn create_document(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentDetail>), ApiError> {
    let document = state.document_service.create(&admin, req.into()).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// PUT /api/docs/documents/{slug}
pub async fn replace_document(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(slug): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateDocumentRequest>,
) -> Result<Json<DocumentDetail>, ApiError> {
    let document = state
        .document_service
        .update(&admin, &slug, req.into(), false)
        .await?;
    Ok(Json(document))
}

/// PATCH /api/docs/documents/{slug}
pub async fn patch_document(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(slug): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateDocumentRequest>,
) -> Result<Json<DocumentDetail>, ApiError> {
    let document = state
        .document_service
        .update(&admin, &slug, req.into(), true)
        .await?;
    Ok(Json(document))
}

/// DELETE /api/docs/documents/{slug}
pub async fn delete_document(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.document_service.delete(&admin, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/docs/documents/{slug}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let outcome = state.document_service.like(&auth, &slug).await?;
    let status = match outcome {
        LikeToggle::Liked => StatusCode::CREATED,
        LikeToggle::Unliked => StatusCode::OK,
    };
    Ok((
        status,
        Json(StatusResponse {
            status: outcome.as_str().to_string(),
        }),
    ))
}

/// PATCH /api/docs/documents/reorder
pub async fn reorder_documents(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<ReorderRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.document_service.reorder(&admin, &req.items).await?;
    Ok(Json(StatusResponse {
        status: "reordered".to_string(),
    }))
}
