//! Blacklisted refresh token entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A consumed or revoked refresh token, keyed by its `jti` claim.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlacklistedToken {
    /// The token's unique identifier.
    pub jti: String,
    /// The user the token was issued to.
    pub user_id: i64,
    /// When the token would have expired. Rows past this are purgeable.
    pub expires_at: DateTime<Utc>,
    /// When the token was blacklisted.
    pub blacklisted_at: DateTime<Utc>,
}
