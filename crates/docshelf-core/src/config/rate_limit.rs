//! Rate limiting configuration.

use serde::{Deserialize, Serialize};

/// Fixed-window limits applied to the register and login endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether rate limiting is enforced at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Requests allowed per client per window.
    #[serde(default = "default_requests")]
    pub requests_per_window: u32,
    /// Window length in seconds.
    #[serde(default = "default_window")]
    pub window_seconds: u64,
    /// Key clients by the first `X-Forwarded-For` entry instead of the
    /// socket address. Only enable behind a trusted proxy.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_window: default_requests(),
            window_seconds: default_window(),
            trust_forwarded_for: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_requests() -> u32 {
    5
}

fn default_window() -> u64 {
    60
}
