//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token, cookie, and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Required.
    #[serde(default)]
    pub secret_key: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: u64,
    /// Refresh token lifetime in seconds.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_seconds: u64,
    /// `Max-Age` of the `access_token` cookie.
    #[serde(default = "default_access_ttl")]
    pub access_cookie_max_age_seconds: u64,
    /// `Max-Age` of the `refresh_token` cookie.
    ///
    /// Deliberately longer than the refresh token itself; the browser keeps
    /// the cookie after the token inside has expired.
    #[serde(default = "default_refresh_cookie_max_age")]
    pub refresh_cookie_max_age_seconds: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            access_token_ttl_seconds: default_access_ttl(),
            refresh_token_ttl_seconds: default_refresh_ttl(),
            access_cookie_max_age_seconds: default_access_ttl(),
            refresh_cookie_max_age_seconds: default_refresh_cookie_max_age(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_access_ttl() -> u64 {
    3600
}

fn default_refresh_ttl() -> u64 {
    86_400
}

fn default_refresh_cookie_max_age() -> u64 {
    604_800
}

fn default_password_min() -> usize {
    8
}
