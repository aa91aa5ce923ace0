//! Dubbing DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::{JobStatus, StatusReport};

/// Response to a dubbing submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DubbingResponse {
    pub dubbing_id: String,
    #[serde(default)]
    pub expected_duration_sec: Option<f64>,
}

/// Metadata of a dubbing project, returned by the status query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DubbingMetadata {
    pub dubbing_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub status: String,
    #[serde(default)]
    pub target_languages: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<DubbingMetadata> for StatusReport {
    fn from(metadata: DubbingMetadata) -> Self {
        StatusReport {
            status: JobStatus::from_service(&metadata.status),
            reason: metadata.error,
        }
    }
}
