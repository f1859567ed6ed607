//! Execution-log feed DTOs

use serde::{Deserialize, Serialize};

use crate::domain::log::LogEntry;

/// One poll of the execution-log feed
///
/// The backend returns the full feed every call. `directory_handle` appears
/// once the job has created its output directory, which may happen well
/// before the job itself completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogFeedResponse {
    pub logs: Vec<LogEntry>,
    #[serde(default)]
    pub directory_handle: Option<String>,
}
