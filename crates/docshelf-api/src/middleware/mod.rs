//! Axum middleware stack.

pub mod cors;
pub mod host;
pub mod logging;
pub mod rate_limit;
