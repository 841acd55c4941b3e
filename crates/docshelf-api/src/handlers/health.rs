//! Health check handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use docshelf_core::traits::cache::CacheProvider;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
///
/// Always 200; `status` is `degraded` when a dependency check fails.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_ok = match docshelf_database::connection::health_check(&state.db_pool).await {
        Ok(ok) => ok,
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            false
        }
    };
    let cache_ok = match state.cache.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            warn!(error = %e, "Cache health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if database_ok && cache_ok { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: label(database_ok).to_string(),
        cache: label(cache_ok).to_string(),
    })
}

fn label(ok: bool) -> &'static str {
    if ok { "connected" } else { "unavailable" }
}
