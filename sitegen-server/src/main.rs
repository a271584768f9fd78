//! Sitegen Server
//!
//! HTTP front of the site generator. Each `POST /generate` runs the staged
//! pipeline (or the single-call path) and stores the result as a project
//! version.

use std::sync::Arc;

use anyhow::{Context, Result};
use sitegen_pipeline::{OpenAiClient, Pipeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod db;
pub mod repository;
pub mod service;

#[cfg(test)]
mod testing;

use crate::api::AppState;
use crate::config::Config;
use crate::repository::{InMemoryProjectStore, PgProjectStore, ProjectStore};
use crate::service::GenerationService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sitegen_server=debug,sitegen_pipeline=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Sitegen Server...");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    tracing::info!(
        "Loaded configuration: default_model={}, stage_timeout={:?}",
        config.default_model,
        config.stage_timeout
    );

    let store = create_store(&config).await?;

    let client = OpenAiClient::new(config.openai.clone())
        .context("Failed to create OpenAI client")?;
    let pipeline = Pipeline::new(Arc::new(client)).with_stage_timeout(config.stage_timeout);
    let generation = GenerationService::new(pipeline, store.clone(), config.default_model.clone());

    // Build router with all API endpoints
    let app = api::create_router(AppState::new(generation, store));

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn create_store(config: &Config) -> Result<Arc<dyn ProjectStore>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set, projects are kept in memory only");
        return Ok(Arc::new(InMemoryProjectStore::new()));
    };

    tracing::info!("Connecting to database...");

    let pool = db::create_pool(database_url, config.db_max_connections)
        .await
        .context("Failed to create database pool")?;

    db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(Arc::new(PgProjectStore::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
