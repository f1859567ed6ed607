//! Job submission DTOs

use serde::{Deserialize, Serialize};

use crate::domain::log::LogEntry;

/// Request to start a document-generation job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitJobRequest {
    /// Prompt describing what to generate
    pub message: String,
    pub api_key: String,
    /// Optional key for the web-search tool the agent may use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_api_key: Option<String>,
    /// Previously uploaded source file the job works from
    pub source_filename: String,
}

/// Terminal response of a job submission
///
/// The submit call is long-running; it resolves only when the job ends.
/// The execution logs and directory handle are also discoverable earlier
/// through polling, so both are optional here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitJobResponse {
    pub final_answer: String,
    #[serde(default)]
    pub execution_logs: Option<Vec<LogEntry>>,
    #[serde(default)]
    pub directory_handle: Option<String>,
}
