//! Database migration management commands.

use clap::{Args, Subcommand};

use hourbook_core::error::AppError;
use hourbook_database::migration;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Show migration status
    Status,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config_path: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;
    config.database.run_migrations = false;

    let store = super::open_store(&config).await?;
    let Some(pool) = store.pool() else {
        output::print_warning("The in-memory store has no schema to migrate.");
        return Ok(());
    };

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            migration::run_migrations(pool.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Status => {
            let applied = migration::applied_count(pool.pool()).await?;
            let embedded = migration::embedded_count();
            output::print_kv("Embedded migrations", &embedded.to_string());
            output::print_kv("Applied migrations", &applied.to_string());
            if (applied as usize) < embedded {
                output::print_warning("Pending migrations found. Run `hourbook migrate run`.");
            } else {
                output::print_success("Database schema is up to date.");
            }
        }
    }

    store.close().await;
    Ok(())
}
