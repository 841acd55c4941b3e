//! # docshelf-entity
//!
//! Domain entity models for Docshelf. Every struct in this crate represents
//! a database table row, a joined projection, or a domain value object.
//! Database entities derive `sqlx::FromRow`.

pub mod document;
pub mod token;
pub mod user;
