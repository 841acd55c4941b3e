//! HTTP request handlers.

pub mod auth;
pub mod block;
pub mod document;
pub mod frontend;
pub mod health;
