//! Operator-facing account administration.

pub mod admin;

pub use admin::AdminUserService;
