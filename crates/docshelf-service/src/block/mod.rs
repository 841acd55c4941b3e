//! Ordered content blocks of a document.

pub mod service;

pub use service::{BlockInput, BlockService};
