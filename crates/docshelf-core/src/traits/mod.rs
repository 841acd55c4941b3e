//! Core traits defined in `docshelf-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
