//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod generate;
mod history;
pub mod project;

pub use generate::GenerateArgs;
pub use project::ProjectCommands;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use sitegen_client::SitegenClient;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a site from a prompt
    Generate(GenerateArgs),
    /// Inspect and export projects
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Show recent generations
    History {
        /// Number of entries to show
        #[arg(short, long)]
        limit: Option<i64>,
    },
    /// Check that the server is reachable
    Health,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Generate(args) => generate::handle_generate_command(args, config).await,
        Commands::Project { command } => project::handle_project_command(command, config).await,
        Commands::History { limit } => history::handle_history_command(limit, config).await,
        Commands::Health => check_health(config).await,
    }
}

async fn check_health(config: &Config) -> Result<()> {
    let client = SitegenClient::new(&config.server_url);
    client
        .health()
        .await
        .with_context(|| format!("Server at {} is not reachable", config.server_url))?;

    println!("{} {}", "✓".green().bold(), config.server_url);
    Ok(())
}

/// Write an html artifact to disk
pub(crate) fn write_html(path: &Path, html: &str) -> Result<()> {
    std::fs::write(path, html)
        .with_context(|| format!("Failed to write html to {}", path.display()))
}
