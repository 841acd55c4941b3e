//! Auth cookie construction.
//!
//! Tokens travel in httpOnly, `SameSite=Lax` cookies on `Path=/`. The
//! `Secure` flag follows `ServerConfig::secure_cookies`.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use uuid::Uuid;

use docshelf_auth::TokenPair;
use docshelf_core::config::AppConfig;

/// Access token cookie.
pub const ACCESS_COOKIE: &str = "access_token";
/// Refresh token cookie.
pub const REFRESH_COOKIE: &str = "refresh_token";
/// Double-submit CSRF cookie, readable by scripts.
pub const CSRF_COOKIE: &str = "csrftoken";

const CSRF_MAX_AGE_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Set both token cookies on the jar.
pub fn set_auth_cookies(jar: CookieJar, pair: &TokenPair, config: &AppConfig) -> CookieJar {
    let secure = config.server.secure_cookies();
    jar.add(token_cookie(
        ACCESS_COOKIE,
        pair.access_token.clone(),
        config.auth.access_cookie_max_age_seconds,
        secure,
    ))
    .add(token_cookie(
        REFRESH_COOKIE,
        pair.refresh_token.clone(),
        config.auth.refresh_cookie_max_age_seconds,
        secure,
    ))
}

/// Expire both token cookies.
pub fn clear_auth_cookies(jar: CookieJar, config: &AppConfig) -> CookieJar {
    let secure = config.server.secure_cookies();
    jar.add(token_cookie(ACCESS_COOKIE, String::new(), 0, secure))
        .add(token_cookie(REFRESH_COOKIE, String::new(), 0, secure))
}

/// Add a `csrftoken` cookie unless the client already holds one.
pub fn ensure_csrf_cookie(jar: CookieJar, config: &AppConfig) -> CookieJar {
    if jar.get(CSRF_COOKIE).is_some() {
        return jar;
    }
    let cookie = Cookie::build((CSRF_COOKIE, Uuid::new_v4().simple().to_string()))
        .path("/")
        .http_only(false)
        .same_site(SameSite::Lax)
        .secure(config.server.secure_cookies())
        .max_age(Duration::seconds(CSRF_MAX_AGE_SECONDS));
    jar.add(cookie)
}

/// Non-empty value of a cookie.
pub fn cookie_value<'a>(jar: &'a CookieJar, name: &str) -> Option<&'a str> {
    jar.get(name).map(Cookie::value).filter(|v| !v.is_empty())
}

fn token_cookie(name: &'static str, value: String, max_age: u64, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(i64::try_from(max_age).unwrap_or(i64::MAX)))
        .build()
}
