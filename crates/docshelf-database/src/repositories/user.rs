//! User repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;

use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::result::AppResult;
use docshelf_entity::user::{CreateUser, User, UserRole};

use super::is_unique_violation;

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by exact username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// Check whether a username is taken.
    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check username", e)
            })
    }

    /// List users, optionally filtered by role, oldest first.
    pub async fn find_all(&self, role: Option<UserRole>) -> AppResult<Vec<User>> {
        let result = match role {
            Some(role) => {
                sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = ? ORDER BY id")
                    .bind(role)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
                    .fetch_all(&self.pool)
                    .await
            }
        };
        result.map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    /// Insert a new user.
    ///
    /// A username collision surfaces as a validation error, which also
    /// covers two registrations racing past the up-front existence check.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let now = Utc::now();
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, role, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::validation("Username already exists")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create user", e)
            }
        })
    }

    /// Change a user's role. Returns `None` if the user does not exist.
    pub async fn update_role(&self, username: &str, role: UserRole) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET role = ?, updated_at = ? WHERE username = ? RETURNING *",
        )
        .bind(role)
        .bind(Utc::now())
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user role", e))
    }
}
