//! Cache key builders for all Docshelf cache entries.
//!
//! Keys are unprefixed here; the Redis provider prepends its configured
//! `key_prefix`.

/// Counter key for one fixed rate-limit window of one client.
pub fn rate_limit(scope: &str, client: &str, window: u64) -> String {
    format!("ratelimit:{scope}:{client}:{window}")
}
