//! Configuration module
//!
//! Handles CLI configuration including the backend URL.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the agent backend
    pub backend_url: String,
}
