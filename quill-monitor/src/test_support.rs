//! Scripted in-memory backend for monitor tests
//!
//! Implements [`AgentBackend`] with per-file behavior scripts and counters
//! for attempts and in-flight concurrency, so tests can assert retry
//! counts, batch bounds, and polling activity without a real server.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use quill_client::error::Result;
use quill_client::{AgentBackend, ClientError};
use quill_core::domain::document::DocumentDescriptor;
use quill_core::dto::directory::{DirectoryListing, FileContentResponse};
use quill_core::dto::job::{SubmitJobRequest, SubmitJobResponse};
use quill_core::dto::log::LogFeedResponse;

/// Per-file fetch behavior
pub(crate) enum FileScript {
    /// Every fetch succeeds with this body
    Ok(&'static str),
    /// First fetch returns 404, subsequent fetches succeed with this body
    NotFoundThen(&'static str),
    /// Every fetch returns 404
    AlwaysNotFound,
    /// Every fetch fails with this HTTP status
    Fail(u16),
}

/// Job submission behavior
enum SubmitScript {
    Succeed(SubmitJobResponse),
    Fail(u16, &'static str),
}

pub(crate) struct MockBackend {
    files: HashMap<String, FileScript>,
    log_feed: LogFeedResponse,
    submit: SubmitScript,
    listing_failure: Option<u16>,
    fetch_delay: Duration,
    list_delay: Duration,
    submit_delay: Duration,

    fetch_attempts: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    list_calls: AtomicUsize,
    poll_log_calls: AtomicUsize,
    submit_calls: AtomicUsize,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        Self {
            files: HashMap::new(),
            log_feed: LogFeedResponse {
                logs: Vec::new(),
                directory_handle: None,
            },
            submit: SubmitScript::Succeed(SubmitJobResponse {
                final_answer: "done".to_string(),
                execution_logs: None,
                directory_handle: None,
            }),
            listing_failure: None,
            fetch_delay: Duration::ZERO,
            list_delay: Duration::ZERO,
            submit_delay: Duration::ZERO,
            fetch_attempts: Mutex::new(HashMap::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            poll_log_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_file(mut self, filename: impl Into<String>, script: FileScript) -> Self {
        self.files.insert(filename.into(), script);
        self
    }

    pub(crate) fn with_log_feed(mut self, feed: LogFeedResponse) -> Self {
        self.log_feed = feed;
        self
    }

    pub(crate) fn with_submit_response(mut self, response: SubmitJobResponse) -> Self {
        self.submit = SubmitScript::Succeed(response);
        self
    }

    pub(crate) fn with_submit_failure(mut self, status: u16, message: &'static str) -> Self {
        self.submit = SubmitScript::Fail(status, message);
        self
    }

    pub(crate) fn with_listing_failure(mut self, status: u16) -> Self {
        self.listing_failure = Some(status);
        self
    }

    pub(crate) fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    pub(crate) fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = delay;
        self
    }

    pub(crate) fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    pub(crate) fn fetch_attempts(&self, filename: &str) -> usize {
        self.fetch_attempts
            .lock()
            .unwrap()
            .get(filename)
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn poll_log_calls(&self) -> usize {
        self.poll_log_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentBackend for MockBackend {
    async fn submit_job(&self, _req: &SubmitJobRequest) -> Result<SubmitJobResponse> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if !self.submit_delay.is_zero() {
            tokio::time::sleep(self.submit_delay).await;
        }
        match &self.submit {
            SubmitScript::Succeed(response) => Ok(response.clone()),
            SubmitScript::Fail(status, message) => Err(ClientError::api_error(*status, *message)),
        }
    }

    async fn poll_logs(&self) -> Result<LogFeedResponse> {
        self.poll_log_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.log_feed.clone())
    }

    async fn list_directory(&self, _handle: &str) -> Result<DirectoryListing> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if !self.list_delay.is_zero() {
            tokio::time::sleep(self.list_delay).await;
        }
        if let Some(status) = self.listing_failure {
            return Err(ClientError::api_error(status, "listing unavailable"));
        }

        let mut filenames: Vec<&String> = self.files.keys().collect();
        filenames.sort();
        Ok(DirectoryListing {
            files: filenames
                .into_iter()
                .map(|filename| DocumentDescriptor {
                    filename: filename.clone(),
                    size: 128,
                    modified_at: chrono::Utc::now(),
                })
                .collect(),
        })
    }

    async fn fetch_file_content(
        &self,
        _handle: &str,
        filename: &str,
    ) -> Result<FileContentResponse> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if !self.fetch_delay.is_zero() {
            tokio::time::sleep(self.fetch_delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let attempt = {
            let mut attempts = self.fetch_attempts.lock().unwrap();
            let count = attempts.entry(filename.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        match self.files.get(filename) {
            Some(FileScript::Ok(body)) => Ok(FileContentResponse {
                filename: filename.to_string(),
                content: (*body).to_string(),
            }),
            Some(FileScript::NotFoundThen(body)) => {
                if attempt == 1 {
                    Err(ClientError::api_error(404, "file not written yet"))
                } else {
                    Ok(FileContentResponse {
                        filename: filename.to_string(),
                        content: (*body).to_string(),
                    })
                }
            }
            Some(FileScript::AlwaysNotFound) => {
                Err(ClientError::api_error(404, "file not written yet"))
            }
            Some(FileScript::Fail(status)) => {
                Err(ClientError::api_error(*status, "backend failure"))
            }
            None => Err(ClientError::api_error(404, "no such file")),
        }
    }
}
