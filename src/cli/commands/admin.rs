use std::sync::Arc;

use clap::Subcommand;
use serde_json::json;

use crate::auth::password;
use crate::cli::utils::{connect_store, output_success, output_value, resolve_password};
use crate::cli::OutputFormat;
use crate::config;
use crate::services::AdminService;

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "Create an admin account")]
    Create {
        #[arg(help = "Admin email address")]
        email: String,
        #[arg(long, help = "Password (read from stdin if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Print an argon2 hash for seeding admin_users by hand")]
    HashPassword {
        #[arg(help = "Password (read from stdin if not provided)")]
        password: Option<String>,
    },
}

pub async fn handle(cmd: AdminCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AdminCommands::Create { email, password } => {
            let password = resolve_password(password)?;
            let config = config::config();
            let store = connect_store(config).await?;
            let service = AdminService::new(
                Arc::new(store),
                config.security.jwt_secret.clone(),
                config.security.jwt_expiry_hours,
            );

            let admin = service.create_admin(&email, &password).await?;
            output_success(
                &output_format,
                &format!("Admin '{}' created", admin.email),
                Some(json!({ "id": admin.id, "email": admin.email })),
            )
        }
        AdminCommands::HashPassword { password } => {
            let plain = resolve_password(password)?;
            password::check_password_strength(&plain).map_err(anyhow::Error::msg)?;
            let hash = password::hash_password(&plain).map_err(|e| anyhow::anyhow!("{}", e))?;
            output_value(&output_format, &hash, json!({ "hash": hash }))
        }
    }
}
