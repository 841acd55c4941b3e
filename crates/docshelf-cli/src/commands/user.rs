//! User management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use docshelf_auth::{PasswordHasher, PasswordValidator, TokenService};
use docshelf_core::config::AppConfig;
use docshelf_core::error::AppError;
use docshelf_database::repositories::{TokenBlacklistRepository, UserRepository};
use docshelf_entity::user::{User, UserRole};
use docshelf_service::auth::RegisterInput;
use docshelf_service::{AdminUserService, AuthService};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create an account, prompting for the password if not given
    Create {
        /// Username
        username: String,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Role: user or admin
        #[arg(long, default_value = "user")]
        role: String,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// List all users
    List {
        /// Filter by role
        #[arg(short, long)]
        role: Option<String>,
    },
    /// Change a user's role
    SetRole {
        /// Username
        username: String,
        /// New role: user or admin
        role: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    role: String,
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
            role: u.role.to_string(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pool = super::open_pool(config).await?;
    let users = Arc::new(UserRepository::new(pool.clone()));
    let admin = AdminUserService::new(Arc::clone(&users));

    match &args.command {
        UserCommand::Create {
            username,
            email,
            role,
            password,
        } => {
            let role: UserRole = role.parse()?;
            let password = match password {
                Some(p) => p.clone(),
                None => prompt_password()?,
            };
            let auth = AuthService::new(
                Arc::clone(&users),
                Arc::new(TokenService::new(
                    &config.auth,
                    (*users).clone(),
                    TokenBlacklistRepository::new(pool),
                )),
                Arc::new(PasswordHasher::new()),
                Arc::new(PasswordValidator::new(&config.auth)),
            );
            let user = auth
                .create_account(
                    RegisterInput {
                        username: username.clone(),
                        email: email.clone(),
                        password,
                    },
                    role,
                )
                .await?;
            output::print_item(&UserRow::from(&user), format);
            output::print_success(&format!("User '{}' created", user.username));
        }
        UserCommand::List { role } => {
            let role = role.as_deref().map(str::parse::<UserRole>).transpose()?;
            let rows: Vec<UserRow> = admin
                .list_users(role)
                .await?
                .iter()
                .map(UserRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        UserCommand::SetRole { username, role } => {
            let role: UserRole = role.parse()?;
            let user = admin.set_role(username, role).await?;
            output::print_success(&format!("User '{}' is now {}", user.username, user.role));
        }
    }

    Ok(())
}

fn prompt_password() -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
