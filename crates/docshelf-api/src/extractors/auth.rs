//! Authentication extractors.
//!
//! Credentials are read from the `access_token` cookie first and from an
//! `Authorization: Bearer` header otherwise. No credentials means
//! anonymous; credentials that fail verification are always a 401, even
//! where anonymous access would be allowed, so clients know to refresh.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use docshelf_core::error::AppError;
use docshelf_service::RequestContext;

use crate::cookies::{ACCESS_COOKIE, cookie_value};
use crate::error::ApiError;
use crate::extractors::client_ip::resolve_client_ip;
use crate::state::AppState;

const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";

/// An authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

/// A caller who may be anonymous.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<RequestContext>);

/// An authenticated caller with the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::Deref for AdminUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl MaybeAuthUser {
    /// The context, if any.
    pub fn context(&self) -> Option<&RequestContext> {
        self.0.as_ref()
    }
}

/// Raw access token presented with the request, if any.
pub fn presented_token(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(token) = cookie_value(&jar, ACCESS_COOKIE) {
        return Some(token.to_string());
    }
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

async fn resolve(parts: &Parts, state: &AppState) -> Result<Option<RequestContext>, ApiError> {
    let Some(token) = presented_token(parts) else {
        return Ok(None);
    };
    let user = state.auth_service.authenticate(&token).await?;
    let ip = resolve_client_ip(
        &parts.headers,
        &parts.extensions,
        state.config.rate_limit.trust_forwarded_for,
    );
    Ok(Some(RequestContext::new(&user, ip)))
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve(parts, state).await?))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve(parts, state)
            .await?
            .map(Self)
            .ok_or_else(|| AppError::authentication(NOT_AUTHENTICATED).into())
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(ctx) = AuthUser::from_request_parts(parts, state).await?;
        if !ctx.is_admin() {
            return Err(AppError::authorization(
                "You do not have permission to perform this action.",
            )
            .into());
        }
        Ok(Self(ctx))
    }
}
