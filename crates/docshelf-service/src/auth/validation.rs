//! Username and email rules shared by registration and admin tooling.

use validator::ValidateEmail;

use docshelf_core::error::AppError;

/// Maximum username length in characters.
pub const USERNAME_MAX_LENGTH: usize = 150;

/// Letters, digits, and `@ . + - _` only; 1 to 150 characters.
pub fn validate_username(username: &str) -> Result<(), AppError> {
    if username.is_empty() {
        return Err(AppError::validation("Username is required."));
    }
    if username.chars().count() > USERNAME_MAX_LENGTH {
        return Err(AppError::validation(format!(
            "Ensure the username has no more than {USERNAME_MAX_LENGTH} characters."
        )));
    }
    if !username.chars().all(is_username_char) {
        return Err(AppError::validation(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        ));
    }
    Ok(())
}

/// An empty email means "not provided" and is accepted.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.is_empty() || email.validate_email() {
        Ok(())
    } else {
        Err(AppError::validation("Enter a valid email address."))
    }
}

fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
}
