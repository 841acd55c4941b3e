//! CLI command definitions and dispatch.

pub mod migrate;
pub mod serve;
pub mod token;
pub mod user;

use clap::{Parser, Subcommand};
use sqlx::SqlitePool;

use docshelf_core::config::AppConfig;
use docshelf_core::error::AppError;
use docshelf_database::DatabasePool;

use crate::output::OutputFormat;

/// Docshelf: documents API and admin tooling
#[derive(Debug, Parser)]
#[command(name = "docshelf", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment; selects `config/{env}.toml`
    #[arg(short, long, env = "DOCSHELF_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Refresh-token blacklist maintenance
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.env)?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Token(args) => token::execute(args, &config).await,
        }
    }
}

/// Helper: open a migrated pool for one-off commands.
pub async fn open_pool(config: &AppConfig) -> Result<SqlitePool, AppError> {
    let pool = DatabasePool::connect(&config.database).await?.into_pool();
    docshelf_database::migration::run_migrations(&pool).await?;
    Ok(pool)
}
