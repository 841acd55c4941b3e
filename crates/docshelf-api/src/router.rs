//! Route definitions for the Docshelf HTTP API.
//!
//! API routes are mounted under `/api`; everything else falls through to
//! the static directory or the SPA entry document.

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware as axum_middleware;
use axum::routing::{get, patch, post};
use tower_http::compression::CompressionLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::rate_limit::RateLimiter;
use crate::state::AppState;

/// Maximum accepted request body.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest("/auth", auth_routes(&state))
        .nest("/docs", document_routes())
        .route("/health", get(handlers::health::health));

    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new(&state.config.frontend.static_dir))
        .fallback(handlers::frontend::spa_fallback)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(middleware::cors::build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::host::enforce_allowed_hosts,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Auth endpoints. Register and login are rate limited per client IP.
fn auth_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            post(handlers::auth::register).route_layer(axum_middleware::from_fn_with_state(
                RateLimiter::new(state.clone(), "register"),
                middleware::rate_limit::rate_limit,
            )),
        )
        .route(
            "/login",
            post(handlers::auth::login).route_layer(axum_middleware::from_fn_with_state(
                RateLimiter::new(state.clone(), "login"),
                middleware::rate_limit::rate_limit,
            )),
        )
        .route("/logout", post(handlers::auth::logout))
        .route("/refresh", post(handlers::auth::refresh))
        .route("/me", get(handlers::auth::me))
}

/// Documents, likes, and the nested block routes. Both path shapes share
/// the `{document}` segment: a slug for document routes, a numeric id for
/// block routes.
fn document_routes() -> Router<AppState> {
    use handlers::block;
    use handlers::document;

    Router::new()
        .route(
            "/documents",
            get(document::list_documents).post(document::create_document),
        )
        .route("/documents/reorder", patch(document::reorder_documents))
        .route(
            "/documents/{document}",
            get(document::get_document)
                .put(document::replace_document)
                .patch(document::patch_document)
                .delete(document::delete_document),
        )
        .route("/documents/{document}/like", post(document::toggle_like))
        .route(
            "/documents/{document}/blocks",
            get(block::list_blocks).post(block::create_block),
        )
        .route(
            "/documents/{document}/blocks/reorder",
            patch(block::reorder_blocks),
        )
        .route(
            "/documents/{document}/blocks/{block}",
            get(block::get_block)
                .put(block::update_block)
                .delete(block::delete_block),
        )
}
