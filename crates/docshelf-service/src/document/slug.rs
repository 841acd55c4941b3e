//! URL slug derivation and validation.

use docshelf_core::error::AppError;

/// Maximum slug length in characters.
pub const SLUG_MAX_LENGTH: usize = 50;

/// Derive a slug from a title.
///
/// Lowercases, keeps ASCII letters, digits, `_` and `-`, collapses runs of
/// whitespace and hyphens into one `-`, and trims leading/trailing `-` and
/// `_`. Non-ASCII characters are dropped. The result is cut to
/// [`SLUG_MAX_LENGTH`] and trimmed again, so it may be empty.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c == '-' || c.is_whitespace() {
            pending_dash = true;
        }
    }

    let truncated: String = slug.chars().take(SLUG_MAX_LENGTH).collect();
    truncated.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Accept a client-supplied slug: 1 to 50 of `[A-Za-z0-9_-]`.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() {
        return Err(AppError::validation("Slug must not be empty."));
    }
    if slug.chars().count() > SLUG_MAX_LENGTH {
        return Err(AppError::validation(format!(
            "Ensure the slug has no more than {SLUG_MAX_LENGTH} characters."
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::validation(
            "Enter a valid slug consisting of letters, numbers, underscores or hyphens.",
        ));
    }
    Ok(())
}
