//! Published monitor state
//!
//! Single-writer, many-reader views of what the monitor has observed:
//! the job session, the execution-log feed, and the directory snapshot.
//! Only the monitor writes; consumers subscribe to read-only `watch`
//! receivers. A snapshot is only ever replaced whole, never patched.

use quill_core::domain::document::DirectorySnapshot;
use quill_core::domain::job::JobSession;
use quill_core::domain::log::LogEntry;
use tokio::sync::watch;

/// Shared handle to the monitor's published state
pub struct MonitorState {
    session: watch::Sender<JobSession>,
    logs: watch::Sender<Vec<LogEntry>>,
    snapshot: watch::Sender<DirectorySnapshot>,
}

impl MonitorState {
    /// Creates empty published state (idle session, no logs, no documents)
    pub fn new() -> Self {
        Self {
            session: watch::channel(JobSession::default()).0,
            logs: watch::channel(Vec::new()).0,
            snapshot: watch::channel(DirectorySnapshot::default()).0,
        }
    }

    /// Read-only view of the job session
    pub fn session_view(&self) -> watch::Receiver<JobSession> {
        self.session.subscribe()
    }

    /// Read-only view of the execution-log feed
    pub fn logs_view(&self) -> watch::Receiver<Vec<LogEntry>> {
        self.logs.subscribe()
    }

    /// Read-only view of the directory snapshot
    pub fn snapshot_view(&self) -> watch::Receiver<DirectorySnapshot> {
        self.snapshot.subscribe()
    }

    /// Current session value
    pub fn current_session(&self) -> JobSession {
        self.session.borrow().clone()
    }

    /// The directory handle, once known
    pub fn directory_handle(&self) -> Option<String> {
        self.session.borrow().directory_handle.clone()
    }

    /// Number of documents in the currently published snapshot
    pub fn document_count(&self) -> usize {
        self.snapshot.borrow().len()
    }

    /// Applies a mutation to the session and notifies viewers
    pub fn update_session(&self, update: impl FnOnce(&mut JobSession)) {
        self.session.send_modify(update);
    }

    /// Records the directory handle the first time it becomes known
    ///
    /// Returns true only on the first call; the handle is never
    /// overwritten afterwards.
    pub fn record_directory_handle(&self, handle: &str) -> bool {
        let mut newly_set = false;
        self.session.send_if_modified(|session| {
            if session.directory_handle.is_none() {
                session.directory_handle = Some(handle.to_string());
                newly_set = true;
                true
            } else {
                false
            }
        });
        newly_set
    }

    /// Replaces the whole log feed with the latest poll result
    pub fn replace_logs(&self, entries: Vec<LogEntry>) {
        self.logs.send_replace(entries);
    }

    /// Publishes a freshly computed snapshot, replacing the previous one
    pub fn publish_snapshot(&self, snapshot: DirectorySnapshot) {
        debug_assert!(snapshot.is_consistent());
        self.snapshot.send_replace(snapshot);
    }

    /// Resets everything to the idle state for a new job
    pub fn reset(&self) {
        self.session.send_replace(JobSession::default());
        self.logs.send_replace(Vec::new());
        self.snapshot.send_replace(DirectorySnapshot::default());
    }
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new()
    }
}
