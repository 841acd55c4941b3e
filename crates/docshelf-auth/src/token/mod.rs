//! Token lifecycle: issuance, authentication, rotation, and revocation.

pub mod service;

pub use service::TokenService;
