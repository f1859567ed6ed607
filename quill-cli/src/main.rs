//! Quill CLI
//!
//! Command-line interface for the document-generation agent backend:
//! submit a job and watch its progress live, or inspect the current
//! execution log and output documents.

mod commands;
mod config;
mod templates;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Agent-written documents from research papers", long_about = None)]
struct Cli {
    /// Backend URL
    #[arg(
        long,
        env = "QUILL_BACKEND_URL",
        default_value = "http://localhost:8000"
    )]
    backend_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        backend_url: cli.backend_url,
    };

    handle_command(cli.command, &config).await
}
