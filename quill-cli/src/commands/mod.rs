//! Command handlers
//!
//! One module per subcommand: running a job, dumping the log feed, and
//! inspecting a job's output documents.

mod documents;
mod logs;
mod run;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;
use crate::templates::PostTemplate;

/// Top-level subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a post from an uploaded paper and watch progress live
    Run {
        /// Previously uploaded source file to work from
        #[arg(long)]
        source: String,

        /// Kind of post to generate
        #[arg(long, value_enum, default_value_t = PostTemplate::Explainer)]
        template: PostTemplate,

        /// Backend API key
        #[arg(long, env = "QUILL_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Optional API key for the agent's web-search tool
        #[arg(long, env = "QUILL_SEARCH_API_KEY", hide_env_values = true)]
        search_api_key: Option<String>,
    },

    /// Print the current execution-log feed
    Logs,

    /// List a job directory's documents and their contents
    Documents {
        /// Directory handle reported by the backend
        handle: String,
    },
}

/// Routes subcommands to their handlers
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Run {
            source,
            template,
            api_key,
            search_api_key,
        } => run::run_job(config, source, template, api_key, search_api_key).await,
        Commands::Logs => logs::show_logs(config).await,
        Commands::Documents { handle } => documents::show_documents(config, &handle).await,
    }
}
