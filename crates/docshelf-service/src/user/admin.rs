//! Account listing and role changes for the command-line tools.

use std::sync::Arc;

use tracing::info;

use docshelf_core::error::AppError;
use docshelf_core::result::AppResult;
use docshelf_database::repositories::UserRepository;
use docshelf_entity::user::{User, UserRole};

/// Account administration that bypasses the HTTP surface.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    users: Arc<UserRepository>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(users: Arc<UserRepository>) -> Self {
        Self { users }
    }

    /// All accounts, optionally restricted to one role.
    pub async fn list_users(&self, role: Option<UserRole>) -> AppResult<Vec<User>> {
        self.users.find_all(role).await
    }

    /// Change an account's role. Takes effect on the user's next request.
    pub async fn set_role(&self, username: &str, role: UserRole) -> AppResult<User> {
        let user = self
            .users
            .update_role(username, role)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))?;
        info!(user_id = user.id, role = %role, "Role changed");
        Ok(user)
    }
}
