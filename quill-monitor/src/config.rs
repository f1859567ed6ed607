//! Monitor configuration
//!
//! Defines all configurable parameters for the monitor including polling
//! periods, the content-fetch retry delay, and the fetch batch size.

use std::time::Duration;

use anyhow::Context;

/// Monitor configuration
///
/// All periods and delays are configurable to allow tuning for different
/// backends (fast local dev server vs a slow remote deployment).
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// How often to poll the execution-log feed while a job is running
    pub log_poll_interval: Duration,

    /// How often to reconcile the output directory once a handle is known.
    /// Slower than the log poll: each round fetches file contents too.
    pub directory_poll_interval: Duration,

    /// How long to wait before the single retry of a content fetch that
    /// failed with "not yet written"
    pub fetch_retry_delay: Duration,

    /// How long after job end to wait before the settle fetch
    pub settle_delay: Duration,

    /// How many content fetches run concurrently within one round
    pub batch_size: usize,
}

impl MonitorConfig {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - QUILL_LOG_POLL_INTERVAL_MS (default: 1000)
    /// - QUILL_DIRECTORY_POLL_INTERVAL_MS (default: 3000)
    /// - QUILL_FETCH_RETRY_DELAY_MS (default: 1000)
    /// - QUILL_SETTLE_DELAY_MS (default: 1000)
    /// - QUILL_FETCH_BATCH_SIZE (default: 3)
    ///
    /// A variable that is set but does not parse is an error, not a
    /// fallback to the default.
    pub fn from_env() -> anyhow::Result<Self> {
        let batch_size = match std::env::var("QUILL_FETCH_BATCH_SIZE") {
            Ok(raw) => raw.parse::<usize>().with_context(|| {
                format!("QUILL_FETCH_BATCH_SIZE must be an integer, got {raw:?}")
            })?,
            Err(_) => 3,
        };

        let config = Self {
            log_poll_interval: ms_from_env("QUILL_LOG_POLL_INTERVAL_MS", 1_000)?,
            directory_poll_interval: ms_from_env("QUILL_DIRECTORY_POLL_INTERVAL_MS", 3_000)?,
            fetch_retry_delay: ms_from_env("QUILL_FETCH_RETRY_DELAY_MS", 1_000)?,
            settle_delay: ms_from_env("QUILL_SETTLE_DELAY_MS", 1_000)?,
            batch_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.log_poll_interval.is_zero() {
            anyhow::bail!("log_poll_interval must be greater than 0");
        }

        if self.directory_poll_interval.is_zero() {
            anyhow::bail!("directory_poll_interval must be greater than 0");
        }

        if self.batch_size == 0 {
            anyhow::bail!("batch_size must be greater than 0");
        }

        Ok(())
    }
}

fn ms_from_env(name: &str, default: u64) -> anyhow::Result<Duration> {
    match std::env::var(name) {
        Ok(raw) => {
            let ms = raw.parse::<u64>().with_context(|| {
                format!("{name} must be an integer millisecond value, got {raw:?}")
            })?;
            Ok(Duration::from_millis(ms))
        }
        Err(_) => Ok(Duration::from_millis(default)),
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            log_poll_interval: Duration::from_secs(1),
            directory_poll_interval: Duration::from_secs(3),
            fetch_retry_delay: Duration::from_secs(1),
            settle_delay: Duration::from_secs(1),
            batch_size: 3,
        }
    }
}
