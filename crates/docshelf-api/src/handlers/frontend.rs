//! SPA entry point for every unmatched browser route.

use axum::extract::State;
use axum::http::{Method, Uri};
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use docshelf_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Fallback for unmatched routes.
///
/// GET and HEAD outside `/api/` get the frontend's `index.html`; anything
/// else is a JSON 404.
pub async fn spa_fallback(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let path = uri.path();
    let is_page = matches!(method, Method::GET | Method::HEAD)
        && path != "/api"
        && !path.starts_with("/api/");

    if !is_page {
        return ApiError(AppError::not_found("Not found.")).into_response();
    }

    let index_path = &state.config.frontend.index_path;
    match tokio::fs::read_to_string(index_path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(path = %index_path, error = %e, "Frontend entry document unreadable");
            ApiError(AppError::internal("Frontend build not found"))
                .into_response()
        }
    }
}
