//! Role-based access control for the document API.

pub mod policy;

pub use policy::{DocumentAction, DocumentPolicy};
