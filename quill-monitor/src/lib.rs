//! Quill Agent Execution Monitor
//!
//! Drives and observes one long-running backend agent job whose progress is
//! not pushed to the client but discovered by polling two independent,
//! eventually-consistent endpoints: the execution-log feed and the output
//! directory.
//!
//! Architecture:
//! - Config: polling periods, batch size, retry delay
//! - Fetcher: single content fetch with one retry on "not yet written"
//! - Loader: batched concurrent fetches producing one atomic snapshot
//! - Scheduler: two periodic polling tasks gated by job liveness
//! - Session: top-level job lifecycle state machine
//!
//! Published state is single-writer: only the monitor mutates it, and a
//! directory snapshot is only ever swapped in whole. Consumers get
//! read-only `watch` views.

pub mod config;
pub mod fetcher;
pub mod loader;
pub mod scheduler;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::MonitorConfig;
pub use scheduler::{PollingScheduler, SchedulerState};
pub use session::JobSessionController;
pub use state::MonitorState;
