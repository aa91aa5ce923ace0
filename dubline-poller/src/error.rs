//! Error types for the job poller

use std::time::Duration;

use dubline_client::ClientError;
use dubline_core::CoreError;
use dubline_core::domain::job::JobStatus;
use thiserror::Error;

/// Failure of a single remote operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Retrying the same call may succeed (network failure, 5xx, rate limit)
    #[error("Transient backend failure: {0}")]
    Transient(String),

    /// The service rejected the call on its merits
    #[error("Backend rejected request: {0}")]
    Rejected(String),
}

impl BackendError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

impl From<ClientError> for BackendError {
    fn from(err: ClientError) -> Self {
        if err.is_transient() {
            BackendError::Transient(err.to_string())
        } else {
            BackendError::Rejected(err.to_string())
        }
    }
}

/// Errors surfaced by [`crate::JobPoller`]
///
/// Every variant reaches the caller; the poller never resubmits a job.
#[derive(Debug, Error)]
pub enum PollerError {
    /// The submission was rejected; nothing was started
    #[error("Submission rejected: {0}")]
    Submission(#[source] BackendError),

    /// The service reported the job as failed
    #[error("Job {job_id} failed: {reason}")]
    JobFailed { job_id: String, reason: String },

    /// The deadline passed while the job was still running
    ///
    /// The job keeps running server-side.
    #[error("Job {job_id} not finished after {waited:?} (last status: {last_status})")]
    Timeout {
        job_id: String,
        waited: Duration,
        last_status: JobStatus,
    },

    /// The job's status could not be determined
    #[error("Lost track of job {job_id} after {attempts} failed status queries: {source}")]
    Polling {
        job_id: String,
        attempts: u32,
        #[source]
        source: BackendError,
    },

    /// The task waiting for the job panicked or was aborted
    #[error("Job task did not finish: {0}")]
    Task(String),

    /// The job completed but downloading its artifact failed
    #[error("Failed to fetch result of job {job_id}: {source}")]
    Fetch {
        job_id: String,
        #[source]
        source: BackendError,
    },
}

impl From<CoreError> for PollerError {
    fn from(err: CoreError) -> Self {
        PollerError::Submission(BackendError::Rejected(err.to_string()))
    }
}

impl PollerError {
    /// The job this error concerns, if one was created
    pub fn job_id(&self) -> Option<&str> {
        match self {
            PollerError::Submission(_) | PollerError::Task(_) => None,
            PollerError::JobFailed { job_id, .. }
            | PollerError::Timeout { job_id, .. }
            | PollerError::Polling { job_id, .. }
            | PollerError::Fetch { job_id, .. } => Some(job_id),
        }
    }
}
