//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use hourbook_core::error::AppError;
use hourbook_core::types::PageRequest;
use hourbook_entity::user::{User, UserRole};
use hourbook_service::{AdminUserService, UserService};
use hourbook_service::user::admin::CreateUserRequest;

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
    /// List users
    List {
        /// Filter by role (volunteer, supervisor, admin)
        #[arg(short, long)]
        role: Option<String>,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    /// Pre-provision a user
    Create {
        /// Email address
        email: String,
        /// Given name
        #[arg(long)]
        first_name: String,
        /// Family name
        #[arg(long, default_value = "")]
        last_name: String,
        /// Role (volunteer, supervisor, admin)
        #[arg(long, default_value = "volunteer")]
        role: String,
        /// Skip the confirmation prompt for admin accounts
        #[arg(long)]
        yes: bool,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    role: String,
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email.clone(),
            name: u.full_name(),
            role: u.role.to_string(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Parses a role name as typed on the command line.
fn parse_role(raw: &str) -> Result<UserRole, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "volunteer" => Ok(UserRole::Volunteer),
        "supervisor" => Ok(UserRole::Supervisor),
        "admin" => Ok(UserRole::Admin),
        other => Err(AppError::validation(format!(
            "Unknown role '{other}'; expected volunteer, supervisor or admin"
        ))),
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config).await?;

    match &args.command {
        UserCommand::List { role, page } => {
            let role = role.as_deref().map(parse_role).transpose()?;
            let users = UserService::new(store.users.clone())
                .list_users(&super::operator_context(), role, &PageRequest::new(*page, 100))
                .await?;

            let rows: Vec<UserRow> = users.items.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
            if users.has_next {
                output::print_kv("More", &format!("use --page {}", page + 1));
            }
        }
        UserCommand::Create {
            email,
            first_name,
            last_name,
            role,
            yes,
        } => {
            let role = parse_role(role)?;
            if role.is_admin() && !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Create '{email}' with full admin rights?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let service = AdminUserService::new(store.users.clone());
            let user = service
                .create_user(
                    &super::operator_context(),
                    CreateUserRequest {
                        email: email.clone(),
                        first_name: first_name.clone(),
                        last_name: last_name.clone(),
                        role,
                    },
                )
                .await?;

            output::print_item(&UserRow::from(&user), format);
            output::print_success(&format!("User '{}' created", user.email));
        }
    }

    store.close().await;
    Ok(())
}
