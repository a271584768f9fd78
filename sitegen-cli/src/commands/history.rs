//! History command handler

use anyhow::Result;
use colored::*;
use sitegen_client::SitegenClient;

use crate::config::Config;

/// Longest prompt excerpt shown per entry
const PROMPT_PREVIEW: usize = 60;

pub async fn handle_history_command(limit: Option<i64>, config: &Config) -> Result<()> {
    let client = SitegenClient::new(&config.server_url);
    let entries = client.list_history(limit).await?;

    if entries.is_empty() {
        println!("{}", "No generations yet.".yellow());
        return Ok(());
    }

    println!("{}", format!("Last {} generation(s):", entries.len()).bold());
    println!();
    for entry in entries {
        println!(
            "  {} {}",
            "▸".cyan(),
            entry.created_at.format("%Y-%m-%d %H:%M:%S")
        );
        println!("    Prompt: {}", preview(&entry.prompt, PROMPT_PREVIEW));
        println!(
            "    Model:  {}  ({} bytes)",
            entry.model_id.dimmed(),
            entry.html.len()
        );
        println!();
    }

    Ok(())
}

/// First line of `text`, cut to `max` characters
fn preview(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() > max {
        let cut: String = line.chars().take(max).collect();
        format!("{}…", cut)
    } else {
        line.to_string()
    }
}
