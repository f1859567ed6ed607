//! Execution-log domain types

use serde::{Deserialize, Serialize};

/// One entry of the backend's agent execution log
///
/// Entries are immutable once received. The backend returns the full feed
/// on every poll, so the client treats the feed as a replaceable snapshot
/// rather than merging entries incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Name of the agent that produced the entry (e.g. "DocWriter")
    pub agent_name: String,
    /// Short action tag (e.g. "starting", "completed")
    pub action: String,
    pub details: String,
}
