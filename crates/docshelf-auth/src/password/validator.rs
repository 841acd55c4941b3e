//! Password policy enforcement for new passwords.

use docshelf_core::config::auth::AuthConfig;
use docshelf_core::error::AppError;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password for the given username.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str, username: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "This password is too short. It must contain at least {} characters.",
                self.min_length
            )));
        }

        if password.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::validation("This password is entirely numeric."));
        }

        if !username.is_empty() && password.eq_ignore_ascii_case(username) {
            return Err(AppError::validation(
                "The password is too similar to the username.",
            ));
        }

        Ok(())
    }
}
