//! Documents command

use std::sync::Arc;

use anyhow::Result;
use colored::*;
use quill_client::{AgentBackend, AgentClient};
use quill_monitor::MonitorConfig;
use quill_monitor::loader::load_snapshot;

use crate::config::Config;

/// Load and display one snapshot of a job's output directory
pub async fn show_documents(config: &Config, handle: &str) -> Result<()> {
    let monitor_config = MonitorConfig::from_env()?;
    let backend: Arc<dyn AgentBackend> = Arc::new(AgentClient::new(&config.backend_url));

    let snapshot = load_snapshot(&backend, handle, &monitor_config).await?;

    if snapshot.is_empty() {
        println!("{}", "No documents yet.".yellow());
        return Ok(());
    }

    println!("{}", format!("{} document(s):", snapshot.len()).bold());
    for doc in &snapshot.documents {
        println!();
        println!(
            "{} ({} bytes, modified {})",
            doc.filename.cyan().bold(),
            doc.size,
            doc.modified_at.format("%Y-%m-%d %H:%M:%S")
        );
        if let Some(content) = snapshot.content(&doc.filename) {
            if content.is_error() {
                println!("{}", content.body.red());
            } else {
                println!("{}", content.body);
            }
        }
    }

    Ok(())
}
