//! Account registration, login, and token lifecycle.

pub mod service;
pub mod validation;

pub use service::{AuthService, RegisterInput};
