use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use project_ready_api::config;
use project_ready_api::database::{DatabaseManager, MemoryStore, PgStore, Store};
use project_ready_api::notify::sender_from_config;
use project_ready_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SMTP_*, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,project_ready_api=debug")),
        )
        .init();

    let config = config::config().clone();
    tracing::info!("Starting Project Ready API in {:?} mode", config.environment);

    if config.security.jwt_secret.trim().is_empty() {
        anyhow::bail!("JWT_SECRET must be set outside development");
    }

    let store: Arc<dyn Store> = match config.database.url {
        Some(_) => {
            let pool = DatabaseManager::connect(&config.database).await?;
            DatabaseManager::migrate(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        None if !config.is_production() => {
            tracing::warn!("DATABASE_URL not set; using in-memory store, data will not persist");
            Arc::new(MemoryStore::new())
        }
        None => anyhow::bail!("DATABASE_URL is required in production"),
    };

    let sender = sender_from_config(&config.mail).context("mail delivery is misconfigured")?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let bootstrap = (
        config.security.bootstrap_admin_email.clone(),
        config.security.bootstrap_admin_password.clone(),
    );
    let state = AppState::new(config, store, sender);

    if let (Some(email), Some(password)) = bootstrap {
        state
            .admin
            .ensure_bootstrap_admin(&email, &password)
            .await
            .context("failed to seed bootstrap admin")?;
    }

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Project Ready API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
