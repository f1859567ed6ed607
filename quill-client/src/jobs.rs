//! Job submission and execution-log endpoints

use crate::AgentClient;
use crate::error::Result;
use quill_core::dto::job::{SubmitJobRequest, SubmitJobResponse};
use quill_core::dto::log::LogFeedResponse;
use tracing::debug;

impl AgentClient {
    /// Submit a document-generation job
    ///
    /// This call is long-running: it resolves only when the backend job
    /// finishes. Progress is observed separately through [`poll_logs`] and
    /// the directory endpoints while this call is in flight.
    ///
    /// [`poll_logs`]: AgentClient::poll_logs
    pub async fn submit_job(&self, req: &SubmitJobRequest) -> Result<SubmitJobResponse> {
        let url = format!("{}/api/jobs", self.base_url);
        debug!("Submitting job for source {}", req.source_filename);
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }

    /// Fetch the current execution-log feed
    ///
    /// The backend returns the full feed each call, plus the job's
    /// directory handle once one exists.
    pub async fn poll_logs(&self) -> Result<LogFeedResponse> {
        let url = format!("{}/api/jobs/logs", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
