//! Sitegen CLI
//!
//! Command-line interface for the Sitegen server.

mod commands;
mod config;
mod project_ref;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "sitegen")]
#[command(about = "Generate websites from a text prompt", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(long, env = "SITEGEN_SERVER_URL", default_value = "http://localhost:8080")]
    server_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        server_url: cli.server_url,
    };

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::project::ProjectCommands;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "sitegen",
            "--server-url",
            "http://sitegen:9000",
            "generate",
            "Landing page for a bakery",
            "--model",
            "gpt-4o",
            "--direct",
            "--out",
            "site.html",
        ])
        .unwrap();

        assert_eq!(cli.server_url, "http://sitegen:9000");
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.prompt, "Landing page for a bakery");
                assert_eq!(args.model.as_deref(), Some("gpt-4o"));
                assert!(args.direct);
                assert!(args.project.is_none());
                assert_eq!(args.out.unwrap().to_str(), Some("site.html"));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_project_export() {
        let cli = Cli::try_parse_from([
            "sitegen", "project", "export", "meu-site", "--version", "2", "--out", "v2.html",
        ])
        .unwrap();

        match cli.command {
            Commands::Project {
                command: ProjectCommands::Export { slug, version, out },
            } => {
                assert_eq!(slug, "meu-site");
                assert_eq!(version, Some(2));
                assert_eq!(out.to_str(), Some("v2.html"));
            }
            _ => panic!("expected project export"),
        }
    }

    #[test]
    fn test_export_requires_out() {
        assert!(Cli::try_parse_from(["sitegen", "project", "export", "meu-site"]).is_err());
    }

    #[test]
    fn test_parse_history_limit() {
        let cli = Cli::try_parse_from(["sitegen", "history", "--limit", "5"]).unwrap();
        assert!(matches!(cli.command, Commands::History { limit: Some(5) }));
    }
}
