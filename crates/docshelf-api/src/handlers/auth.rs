//! Auth handlers: register, login, logout, refresh, me.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use docshelf_core::error::AppError;
use docshelf_service::auth::RegisterInput;

use crate::cookies::{
    REFRESH_COOKIE, clear_auth_cookies, cookie_value, ensure_csrf_cookie, set_auth_cookies,
};
use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{LoginResponse, MessageResponse, RefreshResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .auth_service
        .register(RegisterInput {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let (user, pair) = state
        .auth_service
        .login(&req.username, &req.password)
        .await?;

    let jar = set_auth_cookies(jar, &pair, &state.config);
    Ok((
        jar,
        Json(LoginResponse {
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    state
        .auth_service
        .logout(auth.user_id, cookie_value(&jar, REFRESH_COOKIE))
        .await;

    let jar = clear_auth_cookies(jar, &state.config);
    (
        jar,
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// POST /api/auth/refresh
///
/// Reads the `refresh_token` cookie, or `{"refresh": "..."}` from the body
/// when no cookie is present.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<RefreshResponse>), ApiError> {
    let token = match cookie_value(&jar, REFRESH_COOKIE) {
        Some(token) => token.to_string(),
        None => body_refresh_token(&body)
            .ok_or_else(|| AppError::authentication("Refresh token not found"))?,
    };

    let (_user, pair) = state.auth_service.refresh(&token).await?;
    let jar = set_auth_cookies(jar, &pair, &state.config);
    Ok((
        jar,
        Json(RefreshResponse {
            access: pair.access_token,
            refresh: pair.refresh_token,
        }),
    ))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> (CookieJar, Json<UserResponse>) {
    let jar = ensure_csrf_cookie(jar, &state.config);
    (
        jar,
        Json(UserResponse {
            id: auth.user_id,
            username: auth.username.clone(),
            email: auth.email.clone(),
            role: auth.role,
        }),
    )
}

fn body_refresh_token(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice::<RefreshRequest>(body)
        .ok()
        .and_then(|req| req.refresh)
        .filter(|t| !t.is_empty())
}
