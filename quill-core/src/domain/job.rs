//! Job session domain types

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a job session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobPhase {
    #[default]
    Idle,
    Running,
    Completed,
    Errored,
}

/// Client-side record of one backend job run
///
/// Created when a job is launched and fully reset when the user starts a
/// new one. `directory_handle` is set at most once, the first time the
/// backend reports it; `phase` leaves `Running` exactly once per job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSession {
    pub phase: JobPhase,
    /// Opaque backend reference to where the job's output files live
    pub directory_handle: Option<String>,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
    pub outcome: Option<JobOutcome>,
}

impl JobSession {
    /// Whether the job is still running and should be polled
    pub fn active(&self) -> bool {
        self.phase == JobPhase::Running
    }
}

/// Terminal result of a job, as shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOutcome {
    pub success: bool,
    pub message: String,
}

impl JobOutcome {
    /// Creates a successful outcome carrying the backend's final answer
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Creates a failed outcome carrying a human-readable reason
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
