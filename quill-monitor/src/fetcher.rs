//! Resilient content fetcher
//!
//! Retrieves one file's content from the output directory. The backend
//! writes a file's directory entry and its content in two non-atomic steps,
//! so a "not found" shortly after listing is an expected race, absorbed
//! here by a single delayed retry. Persistent failure yields an
//! error-sentinel body instead of an error: the caller always gets a value
//! for every requested filename.

use std::time::Duration;

use quill_client::AgentBackend;
use quill_core::domain::document::DocumentContent;
use tracing::{debug, warn};

/// Fetches one file's content, retrying once on "not yet written"
///
/// Never fails: any persistent error is converted into a sentinel
/// [`DocumentContent`] embedding the failure reason.
///
/// # Arguments
/// * `backend` - The backend to fetch from
/// * `handle` - The job's directory handle
/// * `filename` - A filename reported by the directory listing
/// * `retry_delay` - How long to wait before the single retry
pub async fn fetch_document(
    backend: &dyn AgentBackend,
    handle: &str,
    filename: &str,
    retry_delay: Duration,
) -> DocumentContent {
    match backend.fetch_file_content(handle, filename).await {
        Ok(response) => DocumentContent::new(filename, response.content),
        Err(e) if e.is_not_found() => {
            debug!(
                "Content for {} not written yet, retrying in {:?}",
                filename, retry_delay
            );
            tokio::time::sleep(retry_delay).await;

            match backend.fetch_file_content(handle, filename).await {
                Ok(response) => {
                    debug!("Retry succeeded for {}", filename);
                    DocumentContent::new(filename, response.content)
                }
                Err(retry_err) => {
                    warn!("Retry failed for {}: {}", filename, retry_err);
                    DocumentContent::error(filename, retry_err)
                }
            }
        }
        Err(e) => {
            warn!("Failed to fetch content for {}: {}", filename, e);
            DocumentContent::error(filename, e)
        }
    }
}
