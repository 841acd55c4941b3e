//! Documents, likes, and listing order.

pub mod service;
pub mod slug;

pub use service::{CreateDocumentInput, DocumentService, UpdateDocumentInput};
