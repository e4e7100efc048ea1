//! CLI command definitions and dispatch.

pub mod class;
pub mod migrate;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use hourbook_core::config::AppConfig;
use hourbook_core::error::AppError;
use hourbook_core::types::UserId;
use hourbook_database::Store;
use hourbook_entity::user::UserRole;
use hourbook_service::RequestContext;

use crate::output::{self, OutputFormat};

/// Hourbook volunteer-hour tracking administration
#[derive(Debug, Parser)]
#[command(name = "hourbook", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

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
    /// Start the Hourbook server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Class catalog management
    Class(class::ClassArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::User(args) => user::execute(args, &self.config, self.format).await,
            Commands::Class(args) => class::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let config = AppConfig::load_file(config_path)?;
    config.validate()?;
    Ok(config)
}

/// Helper: open the configured store, warning when writes will not persist
pub async fn open_store(config: &AppConfig) -> Result<Store, AppError> {
    let store = Store::connect(&config.database).await?;
    if store.pool().is_none() {
        output::print_warning("Using the in-memory store; changes end with this process.");
    }
    Ok(store)
}

/// Context for administrative commands run from a terminal.
pub fn operator_context() -> RequestContext {
    RequestContext::system(UserId::from_uuid(Uuid::nil()), UserRole::Admin)
}
