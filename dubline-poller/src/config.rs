//! Poller configuration
//!
//! Defines the polling interval, the client-side deadline and the bounds on
//! retries and parallelism.

use std::time::Duration;

use thiserror::Error;
use tracing::warn;

/// Invalid poller configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid poller configuration: {0}")]
pub struct ConfigError(pub String);

/// Poller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Delay between consecutive status queries
    pub poll_interval: Duration,

    /// Client-side deadline for a job to reach a terminal status
    pub max_wait: Duration,

    /// Consecutive transient status-query failures tolerated before giving up
    pub max_transient_retries: u32,

    /// Max jobs polled at once by [`crate::JobPoller::run_many`]
    pub max_parallel_jobs: usize,
}

impl PollerConfig {
    /// Creates a new configuration with defaults
    pub fn new() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            max_wait: Duration::from_secs(600), // 10 minutes
            max_transient_retries: 3,
            max_parallel_jobs: 2,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Optional environment variables:
    /// - DUBLINE_POLL_INTERVAL (seconds, default: 5)
    /// - DUBLINE_MAX_WAIT (seconds, default: 600)
    /// - DUBLINE_MAX_RETRIES (default: 3)
    /// - DUBLINE_MAX_PARALLEL_JOBS (default: 2)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::new();

        Self {
            poll_interval: env_parse::<u64>("DUBLINE_POLL_INTERVAL")
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
            max_wait: env_parse::<u64>("DUBLINE_MAX_WAIT")
                .map(Duration::from_secs)
                .unwrap_or(defaults.max_wait),
            max_transient_retries: env_parse("DUBLINE_MAX_RETRIES")
                .unwrap_or(defaults.max_transient_retries),
            max_parallel_jobs: env_parse("DUBLINE_MAX_PARALLEL_JOBS")
                .unwrap_or(defaults.max_parallel_jobs),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    pub fn with_max_transient_retries(mut self, retries: u32) -> Self {
        self.max_transient_retries = retries;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError("poll_interval must be greater than 0".into()));
        }

        if self.max_wait < self.poll_interval {
            return Err(ConfigError(
                "max_wait must be at least one poll_interval".into(),
            ));
        }

        if self.max_parallel_jobs == 0 {
            return Err(ConfigError(
                "max_parallel_jobs must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Option<T> {
    let raw = std::env::var(var).ok()?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable {}={:?}, using default", var, raw);
            None
        }
    }
}
