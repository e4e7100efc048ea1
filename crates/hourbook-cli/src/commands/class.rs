//! Class catalog CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use hourbook_core::error::AppError;
use hourbook_entity::class::Class;
use hourbook_service::ClassService;
use hourbook_service::class::CreateClassRequest;

use crate::output::{self, OutputFormat};

/// Arguments for class commands
#[derive(Debug, Args)]
pub struct ClassArgs {
    /// Class subcommand
    #[command(subcommand)]
    pub command: ClassCommand,
}

/// Class subcommands
#[derive(Debug, Subcommand)]
pub enum ClassCommand {
    /// List all classes
    List,
    /// Add a class to the catalog
    Create {
        /// Course code, e.g. RSSW290
        class_name: String,
        /// Hours required to complete the class
        #[arg(long)]
        hours: f64,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct ClassRow {
    class_name: String,
    hour_requirement: f64,
    created_at: String,
}

impl From<&Class> for ClassRow {
    fn from(c: &Class) -> Self {
        Self {
            class_name: c.class_name.clone(),
            hour_requirement: c.hour_requirement,
            created_at: c.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Execute class commands
pub async fn execute(
    args: &ClassArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config).await?;
    let service = ClassService::new(store.classes.clone());

    match &args.command {
        ClassCommand::List => {
            let classes = service.list_classes().await?;
            let rows: Vec<ClassRow> = classes.iter().map(ClassRow::from).collect();
            output::print_list(&rows, format);
        }
        ClassCommand::Create { class_name, hours } => {
            let class = service
                .create_class(
                    &super::operator_context(),
                    CreateClassRequest {
                        class_name: class_name.clone(),
                        hour_requirement: *hours,
                    },
                )
                .await?;
            output::print_item(&ClassRow::from(&class), format);
            output::print_success(&format!("Class '{}' created", class.class_name));
        }
    }

    store.close().await;
    Ok(())
}
