//! Output-directory endpoints

use crate::AgentClient;
use crate::error::Result;
use quill_core::dto::directory::{DirectoryListing, FileContentResponse};

impl AgentClient {
    /// List the files currently present in a job's output directory
    ///
    /// # Arguments
    /// * `handle` - The opaque directory handle reported by the backend
    pub async fn list_directory(&self, handle: &str) -> Result<DirectoryListing> {
        let url = format!("{}/api/directories/{}/files", self.base_url, handle);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Fetch the content of one output file
    ///
    /// A 404 here does not necessarily mean the file is gone: the backend
    /// lists a file before its content is fully written, so callers are
    /// expected to retry once on `is_not_found`.
    ///
    /// # Arguments
    /// * `handle` - The opaque directory handle
    /// * `filename` - A filename previously returned by [`list_directory`]
    ///
    /// [`list_directory`]: AgentClient::list_directory
    pub async fn fetch_file_content(
        &self,
        handle: &str,
        filename: &str,
    ) -> Result<FileContentResponse> {
        let url = format!(
            "{}/api/directories/{}/files/{}",
            self.base_url, handle, filename
        );
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
