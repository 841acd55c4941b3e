//! Token revocation entities.

pub mod blacklist;

pub use blacklist::BlacklistedToken;
