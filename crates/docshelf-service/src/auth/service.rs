//! Authentication service: register, login, logout, refresh.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use docshelf_auth::{PasswordHasher, PasswordValidator, TokenPair, TokenService};
use docshelf_core::error::AppError;
use docshelf_core::result::AppResult;
use docshelf_database::repositories::UserRepository;
use docshelf_entity::user::{CreateUser, User, UserRole};

use super::validation::{validate_email, validate_username};

/// Fields accepted when creating an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
}

/// Orchestrates credential checks and token issuance.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<UserRepository>,
    tokens: Arc<TokenService>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<UserRepository>,
        tokens: Arc<TokenService>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            tokens,
            hasher,
            validator,
        }
    }

    /// Self-service registration. Always creates a `user`-role account and
    /// issues no tokens.
    pub async fn register(&self, input: RegisterInput) -> AppResult<User> {
        self.create_account(input, UserRole::User).await
    }

    /// Create an account with an explicit role (admin tooling).
    pub async fn create_account(&self, input: RegisterInput, role: UserRole) -> AppResult<User> {
        let username = input.username.trim().to_string();
        validate_username(&username)?;

        let email = input.email.unwrap_or_default().trim().to_string();
        validate_email(&email)?;

        if input.password.is_empty() {
            return Err(AppError::validation("Password is required."));
        }
        self.validator.validate(&input.password, &username)?;

        if self.users.username_exists(&username).await? {
            return Err(AppError::validation("Username already exists"));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .users
            .create(&CreateUser {
                username,
                email,
                password_hash,
                role,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, role = %user.role, "Account created");
        Ok(user)
    }

    /// Verify credentials and issue a token pair.
    ///
    /// Unknown usernames and wrong passwords produce the same error and
    /// take comparable time.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(User, TokenPair)> {
        let Some(user) = self.users.find_by_username(username).await? else {
            self.hasher.verify_dummy(password);
            info!(username, "Login failed: unknown user");
            return Err(AppError::authentication("Invalid credentials"));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            info!(user_id = user.id, "Login failed: wrong password");
            return Err(AppError::authentication("Invalid credentials"));
        }

        let pair = self.tokens.issue(&user)?;
        info!(user_id = user.id, username = %user.username, "Login successful");
        Ok((user, pair))
    }

    /// Best-effort revocation of the presented refresh token.
    ///
    /// Never fails: logout must always clear the client's cookies.
    pub async fn logout(&self, user_id: i64, refresh_token: Option<&str>) {
        if let Some(token) = refresh_token {
            if let Err(e) = self.tokens.blacklist(token).await {
                warn!(user_id, error = %e, "Could not blacklist refresh token on logout");
            }
        }
        info!(user_id, "Logged out");
    }

    /// Rotate a refresh token into a new pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<(User, TokenPair)> {
        self.tokens.refresh(refresh_token).await
    }

    /// Resolve an access token to its user.
    pub async fn authenticate(&self, access_token: &str) -> AppResult<User> {
        self.tokens.authenticate(access_token).await
    }

    /// Drop expired blacklist rows.
    pub async fn purge_expired_tokens(&self) -> AppResult<u64> {
        self.tokens.purge_expired().await
    }
}
