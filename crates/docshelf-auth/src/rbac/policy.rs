//! Document permission predicates.

use docshelf_core::error::AppError;
use docshelf_entity::user::UserRole;

/// Operations gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentAction {
    /// List or read documents.
    Read,
    /// Toggle a like.
    Like,
    /// Create, update, delete, or reorder documents.
    Write,
    /// Any block operation, reads included.
    ManageBlocks,
}

/// Decides whether a caller may perform a [`DocumentAction`].
#[derive(Debug, Clone, Copy)]
pub struct DocumentPolicy {
    allow_anonymous_read: bool,
}

impl DocumentPolicy {
    /// Creates a policy; `allow_anonymous_read` opens `Read` to callers without credentials.
    pub fn new(allow_anonymous_read: bool) -> Self {
        Self {
            allow_anonymous_read,
        }
    }

    /// Check `action` for a caller with `role` (`None` when anonymous).
    ///
    /// Anonymous callers get an authentication error; authenticated callers
    /// without the role get an authorization error.
    pub fn authorize(&self, role: Option<UserRole>, action: DocumentAction) -> Result<(), AppError> {
        let Some(role) = role else {
            return match action {
                DocumentAction::Read if self.allow_anonymous_read => Ok(()),
                _ => Err(AppError::authentication(
                    "Authentication credentials were not provided.",
                )),
            };
        };

        let allowed = match (role, action) {
            (UserRole::Admin, _) => true,
            (UserRole::User, DocumentAction::Read | DocumentAction::Like) => true,
            (UserRole::User, DocumentAction::Write | DocumentAction::ManageBlocks) => false,
        };

        if allowed {
            Ok(())
        } else {
            Err(AppError::authorization(
                "You do not have permission to perform this action.",
            ))
        }
    }

    /// Whether the role may see unpublished documents.
    pub fn sees_unpublished(role: Option<UserRole>) -> bool {
        match role {
            Some(UserRole::Admin) => true,
            Some(UserRole::User) | None => false,
        }
    }
}
