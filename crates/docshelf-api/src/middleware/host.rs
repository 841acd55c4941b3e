//! `Host` header allow-list.

use axum::extract::{Request, State};
use axum::http::header::HOST;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use docshelf_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Whether `host` (port already stripped) matches an allow-list entry.
///
/// An empty list or `*` allows everything; `.example.com` matches the
/// domain and any subdomain; other entries must match exactly.
pub fn host_allowed(host: &str, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    let host = host.to_ascii_lowercase();
    allowed.iter().any(|pattern| {
        let pattern = pattern.to_ascii_lowercase();
        if pattern == "*" {
            true
        } else if let Some(domain) = pattern.strip_prefix('.') {
            host == domain || host.ends_with(&pattern)
        } else {
            host == pattern
        }
    })
}

/// Strip a trailing `:port`, leaving bracketed IPv6 literals intact.
pub fn strip_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    host.rsplit_once(':').map_or(host, |(name, _)| name)
}

/// Rejects requests whose `Host` is not in `server.allowed_hosts`.
pub async fn enforce_allowed_hosts(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let allowed = &state.config.server.allowed_hosts;
    if allowed.is_empty() {
        return next.run(request).await;
    }

    let host = request
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().host())
        .map(strip_port)
        .unwrap_or_default()
        .to_string();

    if host_allowed(&host, allowed) {
        next.run(request).await
    } else {
        warn!(host = %host, "Rejected request for disallowed host");
        ApiError(AppError::validation(format!("Invalid HTTP_HOST header: '{host}'")))
            .into_response()
    }
}
