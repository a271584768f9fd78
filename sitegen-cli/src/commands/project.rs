//! Project command handlers
//!
//! Viewing projects, listing their versions and exporting a version's html.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Subcommand;
use colored::*;
use sitegen_client::SitegenClient;
use sitegen_core::domain::project::Project;
use sitegen_core::domain::version::Version;

use crate::commands::write_html;
use crate::config::Config;

/// Project subcommands
#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Show a project's details
    Show {
        /// Project slug
        slug: String,

        /// Print the raw JSON record
        #[arg(long)]
        json: bool,
    },
    /// List a project's versions, newest first
    Versions {
        /// Project slug
        slug: String,
    },
    /// Write a version's html to a file
    Export {
        /// Project slug
        slug: String,

        /// Version number, 1 being the first generation; defaults to the latest
        #[arg(short, long)]
        version: Option<usize>,

        /// Destination file
        #[arg(short, long)]
        out: PathBuf,
    },
}

/// Handle project commands
pub async fn handle_project_command(command: ProjectCommands, config: &Config) -> Result<()> {
    let client = SitegenClient::new(&config.server_url);

    match command {
        ProjectCommands::Show { slug, json } => show_project(&client, &slug, json).await,
        ProjectCommands::Versions { slug } => list_versions(&client, &slug).await,
        ProjectCommands::Export { slug, version, out } => {
            export_version(&client, &slug, version, out).await
        }
    }
}

async fn show_project(client: &SitegenClient, slug: &str, json: bool) -> Result<()> {
    let project = client.get_project(slug).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&project)?);
    } else {
        print_project_details(&project);
    }

    Ok(())
}

async fn list_versions(client: &SitegenClient, slug: &str) -> Result<()> {
    let versions = client.list_versions(slug).await?;

    if versions.is_empty() {
        println!("{}", "No versions found.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("{} version(s) of {}:", versions.len(), slug).bold()
    );
    println!();
    for (index, version) in versions.iter().enumerate() {
        let number = versions.len() - index;
        println!(
            "  {} {}  {}  {}  {} bytes",
            "▸".cyan(),
            format!("v{}", number).bold(),
            version.created_at.format("%Y-%m-%d %H:%M:%S"),
            version.model_id.dimmed(),
            version.html.len()
        );
    }

    Ok(())
}

async fn export_version(
    client: &SitegenClient,
    slug: &str,
    number: Option<usize>,
    out: PathBuf,
) -> Result<()> {
    let versions = client.list_versions(slug).await?;
    let version = select_version(&versions, number)?;

    write_html(&out, &version.html)?;

    println!(
        "{}",
        format!("✓ Exported {} to {}", slug, out.display())
            .green()
            .bold()
    );
    println!("  Version: {}", version.id.to_string().dimmed());
    println!("  Created: {}", version.created_at.format("%Y-%m-%d %H:%M:%S"));

    Ok(())
}

/// Pick a version by its 1-based number from a newest-first list
fn select_version(versions: &[Version], number: Option<usize>) -> Result<&Version> {
    if versions.is_empty() {
        bail!("Project has no versions");
    }

    match number {
        None => Ok(&versions[0]),
        Some(n) if n >= 1 && n <= versions.len() => Ok(&versions[versions.len() - n]),
        Some(n) => bail!(
            "Version {} does not exist (project has {} version(s))",
            n,
            versions.len()
        ),
    }
}

/// Print detailed project information
fn print_project_details(project: &Project) {
    println!("{}", "Project Details:".bold());
    println!("  Slug:    {}", project.slug.cyan());
    println!("  ID:      {}", project.id.to_string().dimmed());
    println!("  Model:   {}", project.model_id);
    println!(
        "  Created: {}",
        project.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Updated: {}",
        project.updated_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!("  Html:    {} bytes", project.html.len());

    println!("\n{}", "Prompt:".bold());
    println!("{}", "─".repeat(80).dimmed());
    println!("{}", project.prompt);
    println!("{}", "─".repeat(80).dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn versions(htmls: &[&str]) -> Vec<Version> {
        let project_id = Uuid::new_v4();
        htmls
            .iter()
            .map(|html| Version {
                id: Uuid::new_v4(),
                project_id,
                prompt: "loja".to_string(),
                html: html.to_string(),
                model_id: "gpt-4o-mini".to_string(),
                created_at: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn test_select_version_defaults_to_latest() {
        let list = versions(&["v3", "v2", "v1"]);
        assert_eq!(select_version(&list, None).unwrap().html, "v3");
    }

    #[test]
    fn test_select_version_by_number() {
        let list = versions(&["v3", "v2", "v1"]);
        assert_eq!(select_version(&list, Some(1)).unwrap().html, "v1");
        assert_eq!(select_version(&list, Some(3)).unwrap().html, "v3");
        assert!(select_version(&list, Some(0)).is_err());
        assert!(select_version(&list, Some(4)).is_err());
    }

    #[test]
    fn test_select_version_empty() {
        assert!(select_version(&[], None).is_err());
    }
}
