//! Fixed-window rate limiter for the credential endpoints.
//!
//! Counters live in the cache under `ratelimit:{scope}:{client}:{window}`,
//! so with the Redis provider every server process shares them.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use docshelf_cache::keys;
use docshelf_core::config::rate_limit::RateLimitConfig;
use docshelf_core::error::AppError;
use docshelf_core::result::AppResult;
use docshelf_core::traits::cache::CacheProvider;

use crate::error::ApiError;
use crate::extractors::client_ip::resolve_client_ip;
use crate::state::AppState;

/// Counts requests per `(scope, client)` in fixed windows.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    state: AppState,
    scope: &'static str,
}

impl RateLimiter {
    /// Creates a limiter for one scope, e.g. `"login"`.
    pub fn new(state: AppState, scope: &'static str) -> Self {
        Self { state, scope }
    }

    /// Record one request from `client`. Returns `false` once the window's
    /// budget is spent.
    pub async fn check(&self, client: &str) -> AppResult<bool> {
        let config = &self.state.config.rate_limit;
        let window = current_window(config.window_seconds);
        let key = keys::rate_limit(self.scope, client, window);

        let count = self.state.cache.incr(&key).await?;
        if count == 1 {
            self.state
                .cache
                .expire(&key, Duration::from_secs(config.window_seconds))
                .await?;
        }
        Ok(within_budget(count, config))
    }
}

fn current_window(window_seconds: u64) -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    now / window_seconds.max(1)
}

fn within_budget(count: i64, config: &RateLimitConfig) -> bool {
    count <= i64::from(config.requests_per_window)
}

/// Middleware rejecting over-budget requests with 429 before the handler runs.
///
/// Cache failures let the request through.
pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let config = &limiter.state.config.rate_limit;
    if !config.enabled {
        return next.run(request).await;
    }

    let client = resolve_client_ip(
        request.headers(),
        request.extensions(),
        config.trust_forwarded_for,
    );

    match limiter.check(&client).await {
        Ok(true) => next.run(request).await,
        Ok(false) => {
            warn!(scope = limiter.scope, client = %client, "Rate limit exceeded");
            ApiError(AppError::rate_limited("Request was throttled."))
                .into_response()
        }
        Err(e) => {
            warn!(scope = limiter.scope, error = %e, "Rate limiter unavailable, allowing request");
            next.run(request).await
        }
    }
}
