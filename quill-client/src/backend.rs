//! Backend trait seam
//!
//! The monitor depends on this trait rather than on [`AgentClient`]
//! directly, so tests can substitute a scripted in-memory backend.

use async_trait::async_trait;

use crate::AgentClient;
use crate::error::Result;
use quill_core::dto::directory::{DirectoryListing, FileContentResponse};
use quill_core::dto::job::{SubmitJobRequest, SubmitJobResponse};
use quill_core::dto::log::LogFeedResponse;

/// The four backend operations the monitor consumes
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Submit a job; resolves when the backend job finishes
    async fn submit_job(&self, req: &SubmitJobRequest) -> Result<SubmitJobResponse>;

    /// Fetch the full execution-log feed
    async fn poll_logs(&self) -> Result<LogFeedResponse>;

    /// List files in a job's output directory
    async fn list_directory(&self, handle: &str) -> Result<DirectoryListing>;

    /// Fetch the content of one output file
    async fn fetch_file_content(&self, handle: &str, filename: &str)
    -> Result<FileContentResponse>;
}

#[async_trait]
impl AgentBackend for AgentClient {
    async fn submit_job(&self, req: &SubmitJobRequest) -> Result<SubmitJobResponse> {
        AgentClient::submit_job(self, req).await
    }

    async fn poll_logs(&self) -> Result<LogFeedResponse> {
        AgentClient::poll_logs(self).await
    }

    async fn list_directory(&self, handle: &str) -> Result<DirectoryListing> {
        AgentClient::list_directory(self, handle).await
    }

    async fn fetch_file_content(
        &self,
        handle: &str,
        filename: &str,
    ) -> Result<FileContentResponse> {
        AgentClient::fetch_file_content(self, handle, filename).await
    }
}
