//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docshelf_entity::user::{User, UserRole};

/// Context for the current authenticated request.
///
/// Built by the API layer from the user row loaded for the presented
/// access token and passed into service methods, so every operation knows
/// who is acting. Anonymous callers have no context at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: i64,
    /// The username.
    pub username: String,
    /// The email address, empty if none.
    pub email: String,
    /// The user's current role.
    pub role: UserRole,
    /// IP address of the request origin.
    pub ip_address: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context for a loaded user.
    pub fn new(user: &User, ip_address: String) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            ip_address,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Role of an optional caller, `None` when anonymous.
pub fn role_of(ctx: Option<&RequestContext>) -> Option<UserRole> {
    ctx.map(|c| c.role)
}
