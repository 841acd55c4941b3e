//! # docshelf-service
//!
//! Business logic service layer for Docshelf. Each service orchestrates
//! repositories and the auth primitives to implement one group of use
//! cases. Every operation that acts on behalf of a caller takes that
//! caller's [`RequestContext`] explicitly.

pub mod auth;
pub mod block;
pub mod context;
pub mod document;
pub mod user;

pub use auth::AuthService;
pub use block::BlockService;
pub use context::RequestContext;
pub use document::DocumentService;
pub use user::AdminUserService;
