//! Document, block, and like entities.

pub mod block;
pub mod like;
pub mod model;

pub use block::{BlockType, CreateBlock, DocumentBlock, UpdateBlock};
pub use like::{Like, LikeToggle};
pub use model::{
    CreateDocument, Document, DocumentDetail, DocumentSummary, OrderUpdate, UpdateDocument,
};
