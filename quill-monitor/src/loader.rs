//! Batched directory loader
//!
//! One reconciliation round: list the output directory, fetch every listed
//! file's content with bounded concurrency, and return the descriptor list
//! and content map together as a single snapshot. The pair is accumulated
//! locally and returned whole so the caller can publish it in one
//! assignment, which is what keeps the two views mutually consistent.

use std::collections::HashMap;
use std::sync::Arc;

use quill_client::{AgentBackend, ClientError};
use quill_core::domain::document::DirectorySnapshot;
use tracing::warn;

use crate::config::MonitorConfig;
use crate::fetcher::fetch_document;

/// Runs one directory reconciliation round
///
/// Lists the directory (failure propagates: the caller keeps its previous
/// snapshot), then fetches contents in batches of `config.batch_size`.
/// Within a batch all fetches run concurrently; batch N+1 never starts
/// before batch N has fully resolved, bounding peak in-flight requests to
/// the batch size.
pub async fn load_snapshot(
    backend: &Arc<dyn AgentBackend>,
    handle: &str,
    config: &MonitorConfig,
) -> Result<DirectorySnapshot, ClientError> {
    let listing = backend.list_directory(handle).await?;

    let mut documents = Vec::with_capacity(listing.files.len());
    let mut contents = HashMap::with_capacity(listing.files.len());

    for batch in listing.files.chunks(config.batch_size) {
        let mut tasks = Vec::with_capacity(batch.len());

        for descriptor in batch {
            let backend = Arc::clone(backend);
            let handle = handle.to_string();
            let descriptor = descriptor.clone();
            let retry_delay = config.fetch_retry_delay;

            tasks.push(tokio::spawn(async move {
                let content = fetch_document(
                    backend.as_ref(),
                    &handle,
                    &descriptor.filename,
                    retry_delay,
                )
                .await;
                (descriptor, content)
            }));
        }

        for task in tasks {
            match task.await {
                Ok((descriptor, content)) => {
                    contents.insert(descriptor.filename.clone(), content);
                    documents.push(descriptor);
                }
                // A panicked fetch task drops both sides of the pair, so
                // the snapshot invariant still holds.
                Err(e) => warn!("Content fetch task failed: {}", e),
            }
        }
    }

    Ok(DirectorySnapshot::new(documents, contents))
}
