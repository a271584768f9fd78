//! Generate command handler

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::*;
use sitegen_client::SitegenClient;
use sitegen_core::dto::generate::{GenerateRequest, GenerateResponse};

use crate::commands::write_html;
use crate::config::Config;
use crate::project_ref::{ProjectRef, resolve_project_id};

#[derive(Args)]
pub struct GenerateArgs {
    /// Description of the site to build
    pub prompt: String,

    /// Model to use instead of the server default
    #[arg(short, long)]
    pub model: Option<String>,

    /// Regenerate an existing project (slug or ID) as a new version
    #[arg(short, long)]
    pub project: Option<String>,

    /// Use a single model call instead of the staged pipeline
    #[arg(long)]
    pub direct: bool,

    /// Write the html to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Handle the generate command
///
/// Without `--out` the html goes to stdout and the summary to stderr, so the
/// output can be piped.
pub async fn handle_generate_command(args: GenerateArgs, config: &Config) -> Result<()> {
    let client = SitegenClient::new(&config.server_url);

    let project_id = match &args.project {
        Some(reference) => Some(resolve_project_id(&client, &ProjectRef::parse(reference)).await?),
        None => None,
    };

    let req = GenerateRequest {
        prompt: args.prompt,
        model: args.model,
        project_id,
        use_lang_graph: !args.direct,
    };

    eprintln!("{}", format!("Generating ({:?})...", req.mode()).dimmed());
    let site = client.generate(&req).await?;

    match &args.out {
        Some(path) => {
            write_html(path, &site.html)?;
            print_summary(&site);
            println!("  Output:  {}", path.display().to_string().cyan());
        }
        None => {
            eprint_summary(&site);
            print!("{}", site.html);
        }
    }

    Ok(())
}

fn summary_lines(site: &GenerateResponse) -> Vec<String> {
    let mut lines = vec![
        format!("{}", "✓ Site generated successfully!".green().bold()),
        format!("  Project: {}", site.slug.bold()),
        format!("  ID:      {}", site.project_id.to_string().dimmed()),
        format!("  Html:    {} bytes", site.html.len()),
    ];

    let stages = [
        ("Structure", &site.structure),
        ("Content", &site.content),
        ("Design", &site.design),
    ];
    for (name, text) in stages {
        if let Some(text) = text {
            lines.push(format!("  {:<8} {} bytes", format!("{}:", name), text.len()).dimmed().to_string());
        }
    }

    lines
}

fn print_summary(site: &GenerateResponse) {
    for line in summary_lines(site) {
        println!("{}", line);
    }
}

fn eprint_summary(site: &GenerateResponse) {
    for line in summary_lines(site) {
        eprintln!("{}", line);
    }
}
