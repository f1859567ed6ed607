//! Quill HTTP Client
//!
//! A type-safe HTTP client for the document-generation agent backend.
//!
//! The backend exposes four endpoints the monitor cares about: job
//! submission, the execution-log feed, output-directory listing, and file
//! content retrieval. This crate wraps them behind [`AgentClient`] and the
//! mockable [`AgentBackend`] trait.
//!
//! # Example
//!
//! ```no_run
//! use quill_client::AgentClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quill_client::ClientError> {
//!     let client = AgentClient::new("http://localhost:8000");
//!
//!     let feed = client.poll_logs().await?;
//!     println!("{} log entries", feed.logs.len());
//!     Ok(())
//! }
//! ```

mod backend;
mod directory;
pub mod error;
mod jobs;

// Re-export commonly used types
pub use backend::AgentBackend;
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// HTTP client for the agent backend API
#[derive(Debug, Clone)]
pub struct AgentClient {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

/// Error body shape the backend returns on failure
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

impl AgentClient {
    /// Create a new backend client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the backend API (e.g., "http://localhost:8000")
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new backend client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    /// Failure bodies are expected to carry a `detail` field; when they do,
    /// that detail becomes the error message verbatim.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = match serde_json::from_str::<ErrorBody>(&error_text) {
                Ok(body) => body.detail,
                Err(_) => error_text,
            };
            return Err(ClientError::api_error(status.as_u16(), message));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
