//! Job session state machine
//!
//! Top-level controller for one job at a time: starts a job, runs polling
//! while the backend works, commits the terminal result, and resets for
//! the next job. Owns the published [`MonitorState`] and the per-job
//! [`PollingScheduler`].

use std::sync::{Arc, Mutex};

use quill_client::{AgentBackend, ClientError};
use quill_core::domain::document::DirectorySnapshot;
use quill_core::domain::job::{JobOutcome, JobPhase, JobSession};
use quill_core::domain::log::LogEntry;
use quill_core::dto::job::SubmitJobRequest;
use tokio::sync::watch;
use tracing::info;

use crate::config::MonitorConfig;
use crate::scheduler::{PollingScheduler, SchedulerState};
use crate::state::MonitorState;

/// Drives one backend job at a time and publishes everything observed
pub struct JobSessionController {
    backend: Arc<dyn AgentBackend>,
    config: MonitorConfig,
    state: Arc<MonitorState>,
    scheduler: Mutex<Option<Arc<PollingScheduler>>>,
}

impl JobSessionController {
    /// Creates a controller in the idle state
    pub fn new(backend: Arc<dyn AgentBackend>, config: MonitorConfig) -> Self {
        Self {
            backend,
            config,
            state: Arc::new(MonitorState::new()),
            scheduler: Mutex::new(None),
        }
    }

    /// Read-only view of the job session
    pub fn session_view(&self) -> watch::Receiver<JobSession> {
        self.state.session_view()
    }

    /// Read-only view of the execution-log feed
    pub fn logs_view(&self) -> watch::Receiver<Vec<LogEntry>> {
        self.state.logs_view()
    }

    /// Read-only view of the directory snapshot
    pub fn snapshot_view(&self) -> watch::Receiver<DirectorySnapshot> {
        self.state.snapshot_view()
    }

    /// Current session value
    pub fn current_session(&self) -> JobSession {
        self.state.current_session()
    }

    /// Lifecycle state of the current job's scheduler, if any
    pub fn scheduler_state(&self) -> Option<SchedulerState> {
        self.scheduler
            .lock()
            .unwrap()
            .as_ref()
            .map(|scheduler| scheduler.state())
    }

    /// Runs one job from submission to its terminal outcome
    ///
    /// Resets all published state, flips the session to Running, polls the
    /// backend while the (long-running) submit call is in flight, then
    /// commits the terminal result and stops polling. Job failures are
    /// returned as a failed [`JobOutcome`] rather than an error: the
    /// session stays Errored until [`reset`] is called.
    ///
    /// [`reset`]: JobSessionController::reset
    pub async fn start_job(&self, request: SubmitJobRequest) -> JobOutcome {
        if request.api_key.trim().is_empty() {
            // Rejected locally; polling never starts. The previous job's
            // scheduler (and any pending settle fetch) still has to go, or
            // it would write into the reset state below.
            self.teardown_current_scheduler();
            let outcome = JobOutcome::failed("invalid credential: no API key provided");
            self.state.reset();
            let terminal = outcome.clone();
            self.state.update_session(move |session| {
                session.phase = JobPhase::Errored;
                session.ended_at = Some(chrono::Utc::now());
                session.outcome = Some(terminal);
            });
            return outcome;
        }

        self.teardown_current_scheduler();
        self.state.reset();
        self.state.update_session(|session| {
            session.phase = JobPhase::Running;
            session.started_at = Some(chrono::Utc::now());
        });

        let scheduler = PollingScheduler::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.state),
            self.config.clone(),
        );
        scheduler.start();
        *self.scheduler.lock().unwrap() = Some(Arc::clone(&scheduler));

        info!("Job submitted for source {}", request.source_filename);
        let outcome = match self.backend.submit_job(&request).await {
            Ok(response) => {
                if let Some(logs) = response.execution_logs {
                    self.state.replace_logs(logs);
                }
                if let Some(handle) = &response.directory_handle {
                    self.state.record_directory_handle(handle);
                }
                JobOutcome::succeeded(response.final_answer)
            }
            Err(e) => JobOutcome::failed(failure_message(&e)),
        };

        scheduler.stop();
        let terminal = outcome.clone();
        self.state.update_session(move |session| {
            session.phase = if terminal.success {
                JobPhase::Completed
            } else {
                JobPhase::Errored
            };
            session.ended_at = Some(chrono::Utc::now());
            session.outcome = Some(terminal);
        });

        // If the directory was discovered too late for any tick to land,
        // give it one last chance.
        scheduler.schedule_settle_fetch();

        info!(
            "Job finished: {}",
            if outcome.success { "completed" } else { "errored" }
        );
        outcome
    }

    /// Returns to Idle, discarding all published state
    pub fn reset(&self) {
        self.teardown_current_scheduler();
        self.state.reset();
    }

    fn teardown_current_scheduler(&self) {
        if let Some(scheduler) = self.scheduler.lock().unwrap().take() {
            scheduler.teardown();
        }
    }
}

impl Drop for JobSessionController {
    fn drop(&mut self) {
        self.teardown_current_scheduler();
    }
}

/// Maps a submission failure to the user-visible terminal message
fn failure_message(error: &ClientError) -> String {
    if error.is_unauthorized() {
        return "invalid credential: the backend rejected the provided API key".to_string();
    }
    match error {
        ClientError::ApiError { message, .. } if !message.is_empty() => message.clone(),
        other => format!("job failed: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FileScript, MockBackend};
    use quill_core::dto::job::SubmitJobResponse;
    use quill_core::dto::log::LogFeedResponse;
    use std::time::Duration;

    fn request(api_key: &str) -> SubmitJobRequest {
        SubmitJobRequest {
            message: "Write an explainer post".to_string(),
            api_key: api_key.to_string(),
            search_api_key: None,
            source_filename: "paper.pdf".to_string(),
        }
    }

    fn controller_with(mock: MockBackend) -> (Arc<MockBackend>, JobSessionController) {
        let mock = Arc::new(mock);
        let controller = JobSessionController::new(mock.clone(), MonitorConfig::default());
        (mock, controller)
    }

    fn log_entry(agent: &str, action: &str) -> quill_core::domain::log::LogEntry {
        quill_core::domain::log::LogEntry {
            timestamp: chrono::Utc::now(),
            agent_name: agent.to_string(),
            action: action.to_string(),
            details: String::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_job_lifecycle() {
        let mock = MockBackend::new()
            .with_log_feed(LogFeedResponse {
                logs: vec![log_entry("System", "initializing")],
                directory_handle: Some("job-dir".to_string()),
            })
            .with_file("DRAFT_post.md", FileScript::Ok("Draft text"))
            .with_submit_delay(Duration::from_secs(5))
            .with_submit_response(SubmitJobResponse {
                final_answer: "Here is your post".to_string(),
                execution_logs: None,
                directory_handle: Some("job-dir".to_string()),
            });
        let (_mock, controller) = controller_with(mock);

        let outcome = controller.start_job(request("sk-test")).await;

        assert!(outcome.success);
        assert_eq!(outcome.message, "Here is your post");

        let session = controller.current_session();
        assert_eq!(session.phase, JobPhase::Completed);
        assert!(session.started_at.is_some());
        assert!(session.ended_at.is_some());
        assert_eq!(session.directory_handle, Some("job-dir".to_string()));

        // Polling during the run observed both the feed and the document.
        assert!(!controller.logs_view().borrow().is_empty());
        let snapshot = controller.snapshot_view().borrow().clone();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.content("DRAFT_post.md").unwrap().body, "Draft text");

        assert_eq!(controller.scheduler_state(), Some(SchedulerState::Stopped));
    }

    #[tokio::test(start_paused = true)]
    async fn test_credential_rejected_by_backend() {
        let mock = MockBackend::new().with_submit_failure(401, "Invalid API key");
        let (mock, controller) = controller_with(mock);

        let outcome = controller.start_job(request("sk-bad")).await;

        assert!(!outcome.success);
        assert!(outcome.message.contains("invalid credential"));
        assert_eq!(controller.current_session().phase, JobPhase::Errored);
        // No handle was ever reported, so directory polling never started.
        assert_eq!(mock.list_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_credential_never_polls() {
        let (mock, controller) = controller_with(MockBackend::new());

        let outcome = controller.start_job(request("  ")).await;

        assert!(!outcome.success);
        assert!(outcome.message.contains("invalid credential"));
        assert_eq!(controller.current_session().phase, JobPhase::Errored);
        assert_eq!(mock.submit_calls(), 0);
        assert_eq!(mock.poll_log_calls(), 0);
        assert_eq!(controller.scheduler_state(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_validation_failure_surfaces_backend_detail() {
        let mock =
            MockBackend::new().with_submit_failure(422, "No source file named paper.pdf");
        let (_mock, controller) = controller_with(mock);

        let outcome = controller.start_job(request("sk-test")).await;

        assert!(!outcome.success);
        assert_eq!(outcome.message, "No source file named paper.pdf");
        assert_eq!(controller.current_session().phase, JobPhase::Errored);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_fetch_after_late_handle() {
        // Handle arrives only with the terminal response; no periodic
        // directory tick ever ran.
        let mock = MockBackend::new().with_submit_response(SubmitJobResponse {
            final_answer: "done".to_string(),
            execution_logs: None,
            directory_handle: Some("job-dir".to_string()),
        });
        let (mock, controller) = controller_with(mock);

        let outcome = controller.start_job(request("sk-test")).await;
        assert!(outcome.success);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(mock.list_calls(), 1);
        assert_eq!(controller.snapshot_view().borrow().len(), 0);

        // Empty settle result: polling stays stopped for good.
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(mock.list_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_start_cancels_pending_settle_fetch() {
        // Job 1 learns its handle only from the terminal response, so its
        // settle fetch is still pending when the next start comes in.
        let mock = MockBackend::new()
            .with_file("DRAFT_post.md", FileScript::Ok("Draft text"))
            .with_submit_response(SubmitJobResponse {
                final_answer: "done".to_string(),
                execution_logs: None,
                directory_handle: Some("job-dir".to_string()),
            });
        let (mock, controller) = controller_with(mock);

        let first = controller.start_job(request("sk-test")).await;
        assert!(first.success);

        let second = controller.start_job(request("  ")).await;
        assert!(!second.success);

        // The rejected start tore the old scheduler down, so the settle
        // fetch never runs and job 1's documents never reappear.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(mock.list_calls(), 0);
        assert_eq!(controller.snapshot_view().borrow().len(), 0);
        assert_eq!(controller.current_session().phase, JobPhase::Errored);
        assert_eq!(controller.scheduler_state(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_returns_to_idle() {
        let mock = MockBackend::new().with_submit_failure(500, "agent crashed");
        let (_mock, controller) = controller_with(mock);

        controller.start_job(request("sk-test")).await;
        assert_eq!(controller.current_session().phase, JobPhase::Errored);

        controller.reset();

        let session = controller.current_session();
        assert_eq!(session.phase, JobPhase::Idle);
        assert_eq!(session.directory_handle, None);
        assert!(controller.logs_view().borrow().is_empty());
        assert_eq!(controller.snapshot_view().borrow().len(), 0);
        assert_eq!(controller.scheduler_state(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_job_discards_previous_job_state() {
        let mock = MockBackend::new()
            .with_log_feed(LogFeedResponse {
                logs: vec![log_entry("System", "initializing")],
                directory_handle: Some("job-dir".to_string()),
            })
            .with_file("DRAFT_post.md", FileScript::Ok("Draft text"))
            .with_submit_delay(Duration::from_secs(5))
            .with_submit_response(SubmitJobResponse {
                final_answer: "first".to_string(),
                execution_logs: None,
                directory_handle: None,
            });
        let (_mock, controller) = controller_with(mock);

        controller.start_job(request("sk-test")).await;
        assert_eq!(controller.snapshot_view().borrow().len(), 1);

        // Starting the next job clears everything the first one published.
        let second = controller.start_job(request("sk-test")).await;
        assert!(second.success);
        let session = controller.current_session();
        assert_eq!(session.phase, JobPhase::Completed);
    }
}
