//! Logs command

use anyhow::Result;
use colored::*;
use quill_client::AgentClient;

use crate::config::Config;

/// Fetch and pretty-print the current execution-log feed
pub async fn show_logs(config: &Config) -> Result<()> {
    let client = AgentClient::new(&config.backend_url);
    let feed = client.poll_logs().await?;

    if feed.logs.is_empty() {
        println!("{}", "No log entries.".yellow());
    } else {
        println!("{}", format!("{} log entries:", feed.logs.len()).bold());
        println!();
        for entry in &feed.logs {
            println!(
                "{} {} {} {}",
                format!("[{}]", entry.timestamp.format("%H:%M:%S")).dimmed(),
                entry.agent_name.cyan().bold(),
                entry.action.yellow(),
                entry.details
            );
        }
    }

    if let Some(handle) = feed.directory_handle {
        println!();
        println!("Working directory: {}", handle.cyan());
    }

    Ok(())
}
