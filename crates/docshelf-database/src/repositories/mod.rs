//! Repository implementations for all Docshelf entities.

pub mod block;
pub mod document;
pub mod like;
pub mod token;
pub mod user;

pub use block::BlockRepository;
pub use document::DocumentRepository;
pub use like::LikeRepository;
pub use token::TokenBlacklistRepository;
pub use user::UserRepository;

/// Whether a sqlx error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
