//! Roster server entry point.
//!
//! Loads configuration from the environment, connects to PostgreSQL, runs
//! pending migrations, and serves the user directory API.

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster_core::UserDirectory;
use roster_core::credentials::CredentialManager;
use roster_core::store::PostgresUserStore;
use roster_server::infra::{app_state::AppState, config::Config};
use roster_server::users::auth::TokenService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    roster_core::MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let credentials = CredentialManager::new(config.password_work_factor)
        .context("Failed to initialize credential manager")?;
    let directory = UserDirectory::new(Arc::new(PostgresUserStore::new(pool)), credentials);
    let tokens = TokenService::new(&config.auth_token_key, config.auth_token_ttl_secs);

    let addr = format!("{}:{}", config.server_host, config.server_port);

    let state = AppState::new(
        Arc::new(directory),
        Arc::new(tokens),
        Arc::new(config),
    );

    let app = roster_server::create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Roster server listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
