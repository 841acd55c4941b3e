//! Refresh-token blacklist maintenance.

use std::sync::Arc;

use clap::{Args, Subcommand};

use docshelf_auth::{PasswordHasher, PasswordValidator, TokenService};
use docshelf_core::config::AppConfig;
use docshelf_core::error::AppError;
use docshelf_database::repositories::{TokenBlacklistRepository, UserRepository};
use docshelf_service::AuthService;

use crate::output;

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Delete blacklist entries whose tokens have expired anyway
    Purge,
}

/// Execute token commands
pub async fn execute(args: &TokenArgs, config: &AppConfig) -> Result<(), AppError> {
    let pool = super::open_pool(config).await?;
    let users = Arc::new(UserRepository::new(pool.clone()));
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

    match &args.command {
        TokenCommand::Purge => {
            let removed = auth.purge_expired_tokens().await?;
            output::print_success(&format!("Purged {removed} expired blacklist entries."));
        }
    }
    Ok(())
}
