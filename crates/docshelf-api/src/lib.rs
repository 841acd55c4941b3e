//! # docshelf-api
//!
//! HTTP API layer for Docshelf built on Axum.
//!
//! Provides the auth and document endpoints, the SPA fallback, middleware
//! (rate limiting, host checks, CORS, logging), extractors, DTOs, and
//! error mapping.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
