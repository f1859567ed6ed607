//! Run command
//!
//! Submits a job and mirrors its progress to the terminal while it runs:
//! new execution-log entries as they appear, and the working directory's
//! document list whenever a fresh snapshot is published.

use std::sync::Arc;

use anyhow::Result;
use colored::*;
use quill_client::{AgentBackend, AgentClient};
use quill_core::domain::log::LogEntry;
use quill_core::dto::job::SubmitJobRequest;
use quill_monitor::{JobSessionController, MonitorConfig};

use crate::config::Config;
use crate::templates::PostTemplate;

/// Submit a job and watch it to completion
pub async fn run_job(
    config: &Config,
    source: String,
    template: PostTemplate,
    api_key: String,
    search_api_key: Option<String>,
) -> Result<()> {
    let monitor_config = MonitorConfig::from_env()?;
    let backend: Arc<dyn AgentBackend> = Arc::new(AgentClient::new(&config.backend_url));
    let controller = JobSessionController::new(backend, monitor_config);

    let log_printer = spawn_log_printer(&controller);
    let snapshot_printer = spawn_snapshot_printer(&controller);

    println!("{}", format!("Generating post from {source}...").bold());
    println!();

    let outcome = controller
        .start_job(SubmitJobRequest {
            message: template.prompt().to_string(),
            api_key,
            search_api_key,
            source_filename: source,
        })
        .await;

    log_printer.abort();
    snapshot_printer.abort();

    println!();
    if outcome.success {
        println!("{}", "Job completed.".green().bold());
        println!();
        println!("{}", outcome.message);
    } else {
        println!("{}", "Job failed.".red().bold());
        println!("{}", outcome.message.red());
    }

    print_final_documents(&controller);

    Ok(())
}

/// Prints log entries as the feed grows
fn spawn_log_printer(controller: &JobSessionController) -> tokio::task::JoinHandle<()> {
    let mut logs_view = controller.logs_view();
    tokio::spawn(async move {
        let mut printed = 0;
        while logs_view.changed().await.is_ok() {
            let entries = logs_view.borrow_and_update().clone();
            // The feed is a whole-snapshot replacement; a shrink means a
            // new job started.
            if entries.len() < printed {
                printed = 0;
            }
            for entry in &entries[printed..] {
                print_log_entry(entry);
            }
            printed = entries.len();
        }
    })
}

/// Prints the document list whenever a fresh snapshot is published
fn spawn_snapshot_printer(controller: &JobSessionController) -> tokio::task::JoinHandle<()> {
    let mut snapshot_view = controller.snapshot_view();
    tokio::spawn(async move {
        while snapshot_view.changed().await.is_ok() {
            let snapshot = snapshot_view.borrow_and_update().clone();
            if snapshot.is_empty() {
                continue;
            }
            println!(
                "{}",
                format!("  [{} document(s) in working directory]", snapshot.len()).dimmed()
            );
        }
    })
}

fn print_log_entry(entry: &LogEntry) {
    let time = entry.timestamp.format("%H:%M:%S");
    let details: String = if entry.details.chars().count() > 100 {
        let truncated: String = entry.details.chars().take(100).collect();
        format!("{truncated}...")
    } else {
        entry.details.clone()
    };
    println!(
        "{} {} {} {}",
        format!("[{}]", time).dimmed(),
        entry.agent_name.cyan().bold(),
        entry.action.yellow(),
        details
    );
}

fn print_final_documents(controller: &JobSessionController) {
    let snapshot = controller.snapshot_view().borrow().clone();
    if snapshot.is_empty() {
        return;
    }

    println!();
    println!(
        "{}",
        format!("{} document(s) produced:", snapshot.len()).bold()
    );
    for doc in &snapshot.documents {
        println!();
        println!("{} ({} bytes)", doc.filename.cyan().bold(), doc.size);
        if let Some(content) = snapshot.content(&doc.filename) {
            if content.is_error() {
                println!("{}", content.body.red());
            } else {
                println!("{}", content.body);
            }
        }
    }
}
