//! # docshelf-auth
//!
//! Authentication and authorization for Docshelf.
//!
//! ## Modules
//!
//! - `jwt`: access/refresh token creation and validation
//! - `token`: token lifecycle over the user table and refresh blacklist
//! - `password`: Argon2id password hashing and policy enforcement
//! - `rbac`: role-based document permission predicates

pub mod jwt;
pub mod password;
pub mod rbac;
pub mod token;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{DocumentAction, DocumentPolicy};
pub use token::TokenService;

/// The one message every token verification failure is reported with.
pub const INVALID_TOKEN: &str = "Invalid or expired token";
