//! Typed path parameter helpers.

use docshelf_core::error::AppError;

/// Parse a numeric id from a path segment. Anything else cannot name a
/// row, so it is reported as missing.
pub fn parse_id(segment: &str, what: &str) -> Result<i64, AppError> {
    segment
        .parse::<i64>()
        .map_err(|_| AppError::not_found(format!("{what} not found")))
}
