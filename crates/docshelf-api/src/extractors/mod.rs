//! Custom Axum extractors.

pub mod auth;
pub mod client_ip;
pub mod json;
pub mod path;

pub use auth::{AdminUser, AuthUser, MaybeAuthUser};
pub use json::ValidatedJson;
