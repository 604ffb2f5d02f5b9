//! TaskPilot Backend Server

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;
use taskpilot_backend::{
    api::{create_router, AppState},
    auth::{TokenService, UserStore},
    config::AppConfig,
    projects::ProjectStore,
    tasks::TaskStore,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskpilot_backend=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(AppConfig::from_env());
    info!("🚀 Starting TaskPilot backend");

    // All stores share one SQLite file.
    let users = Arc::new(UserStore::new(&config.database_path)?);
    let projects = Arc::new(ProjectStore::new(&config.database_path)?);
    let tasks = Arc::new(TaskStore::new(&config.database_path)?);
    info!("📊 Database initialized at: {}", config.database_path);

    // Idempotent admin bootstrap.
    users.ensure_admin(&config.admin_email, &config.admin_password, config.bcrypt_cost)?;

    let tokens = Arc::new(TokenService::new(
        config.jwt_secret.clone(),
        config.jwt_expiry_secs,
    ));

    let state = AppState {
        config: config.clone(),
        users,
        projects,
        tasks,
        tokens,
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("🎯 API server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
