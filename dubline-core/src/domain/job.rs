//! Job domain types

use serde::{Deserialize, Serialize};

use crate::domain::language::TargetLanguage;

/// Handle to a job submitted to the processing service
///
/// The handle is the only state the poller keeps for a job. It is created by
/// submission and dropped once the job's artifact or failure has been reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    /// Opaque identifier returned by the service, unique per submission
    pub job_id: String,
    /// Parameter chosen at submission, needed again to fetch the result
    pub target: TargetLanguage,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

impl JobHandle {
    pub fn new(job_id: impl Into<String>, target: TargetLanguage) -> Self {
        Self {
            job_id: job_id.into(),
            target,
            submitted_at: chrono::Utc::now(),
        }
    }

    /// Time elapsed since the job was submitted
    pub fn age(&self) -> chrono::Duration {
        chrono::Utc::now().signed_duration_since(self.submitted_at)
    }
}

/// Job status as reported by the processing service
///
/// Statuses only move forward: `Pending` → `Processing` → `Complete` | `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    Processing,
    Complete,
    Failed,
}

impl JobStatus {
    /// Maps a status string reported by the service onto a `JobStatus`
    ///
    /// Unknown strings are treated as `Processing` so they can never end a
    /// poll loop on their own.
    pub fn from_service(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" | "queued" => JobStatus::Pending,
            "dubbing" | "processing" | "in_progress" => JobStatus::Processing,
            "dubbed" | "complete" | "completed" => JobStatus::Complete,
            "failed" | "error" => JobStatus::Failed,
            other => {
                tracing::debug!("Unknown job status '{}', treating as processing", other);
                JobStatus::Processing
            }
        }
    }

    /// Whether no further transition can occur from this status
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Complete | JobStatus::Failed)
    }

    fn rank(self) -> u8 {
        match self {
            JobStatus::Pending => 0,
            JobStatus::Processing => 1,
            JobStatus::Complete | JobStatus::Failed => 2,
        }
    }

    /// Folds a new observation into the status observed so far
    ///
    /// A terminal status is final, and an observation ranked below the
    /// current status is ignored.
    pub fn advance(self, next: JobStatus) -> JobStatus {
        if self.is_terminal() || next.rank() < self.rank() {
            self
        } else {
            next
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Complete => "complete",
            JobStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// One answer to a status query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub status: JobStatus,
    /// Server-provided reason, usually only present on failure
    pub reason: Option<String>,
}

impl StatusReport {
    pub fn new(status: JobStatus) -> Self {
        Self {
            status,
            reason: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Failed,
            reason: Some(reason.into()),
        }
    }
}

/// Binary result of a successfully completed job
///
/// Owned by the caller once returned; nothing keeps a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub job_id: String,
    pub target: TargetLanguage,
    pub bytes: Vec<u8>,
    /// Number of status queries issued before the job reached completion
    pub status_queries: u32,
}

impl Artifact {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
