//! Backend layer
//!
//! The poller talks to the processing service through three operations:
//! submit, status and fetch. They sit behind a trait so the poll loop can be
//! driven by a scripted fake in tests.

use async_trait::async_trait;
use dubline_client::SpeechClient;
use dubline_core::domain::job::StatusReport;
use dubline_core::domain::language::TargetLanguage;
use tracing::debug;

use crate::error::BackendError;

/// Remote operations of an asynchronous processing service
#[async_trait]
pub trait JobBackend: Send + Sync {
    /// Submits the payload once and returns the service's job ID
    ///
    /// # Arguments
    /// * `payload` - Media bytes to process
    /// * `file_name` - Upload name of the payload
    /// * `target` - Parameter chosen for the job's lifetime
    async fn submit(
        &self,
        payload: Vec<u8>,
        file_name: &str,
        target: &TargetLanguage,
    ) -> Result<String, BackendError>;

    /// Queries the job's current status
    async fn status(&self, job_id: &str) -> Result<StatusReport, BackendError>;

    /// Downloads the artifact of a completed job
    ///
    /// # Arguments
    /// * `job_id` - The ID returned by `submit`
    /// * `target` - The same parameter given to `submit`
    async fn fetch_result(
        &self,
        job_id: &str,
        target: &TargetLanguage,
    ) -> Result<Vec<u8>, BackendError>;
}

/// Dubbing implementation of JobBackend
#[derive(Debug, Clone)]
pub struct DubbingBackend {
    client: SpeechClient,
}

impl DubbingBackend {
    /// Creates a backend issuing requests through `client`
    pub fn new(client: SpeechClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobBackend for DubbingBackend {
    async fn submit(
        &self,
        payload: Vec<u8>,
        file_name: &str,
        target: &TargetLanguage,
    ) -> Result<String, BackendError> {
        let response = self
            .client
            .submit_dubbing(payload, file_name, target.as_str())
            .await?;

        if let Some(expected) = response.expected_duration_sec {
            debug!(
                "Dubbing {} expected to take {:.0}s",
                response.dubbing_id, expected
            );
        }

        Ok(response.dubbing_id)
    }

    async fn status(&self, job_id: &str) -> Result<StatusReport, BackendError> {
        let metadata = self.client.get_dubbing(job_id).await?;
        Ok(metadata.into())
    }

    async fn fetch_result(
        &self,
        job_id: &str,
        target: &TargetLanguage,
    ) -> Result<Vec<u8>, BackendError> {
        Ok(self
            .client
            .get_dubbed_audio(job_id, target.as_str())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PollerConfig;
    use crate::poller::JobPoller;
    use dubline_client::API_KEY_HEADER;
    use dubline_core::domain::job::JobStatus;
    use mockito::Matcher;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn backend_for(server: &mockito::ServerGuard) -> DubbingBackend {
        DubbingBackend::new(SpeechClient::new(server.url(), "test_key"))
    }

    fn metadata(status: &str) -> String {
        json!({
            "dubbing_id": "dub-123",
            "name": "nicole",
            "status": status,
            "target_languages": ["es"]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_status_maps_dubbed_to_complete() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/dubbing/dub-123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(metadata("dubbed"))
            .create_async()
            .await;

        let report = backend_for(&server).status("dub-123").await.unwrap();
        assert_eq!(report.status, JobStatus::Complete);
    }

    #[tokio::test]
    async fn test_server_error_is_transient() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/dubbing/dub-123")
            .with_status(503)
            .with_body("try again later")
            .create_async()
            .await;

        let err = backend_for(&server).status("dub-123").await.unwrap_err();
        assert!(matches!(err, BackendError::Transient(_)));
    }

    #[tokio::test]
    async fn test_not_found_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/dubbing/missing")
            .with_status(404)
            .with_body("dubbing not found")
            .create_async()
            .await;

        let err = backend_for(&server).status("missing").await.unwrap_err();
        assert!(matches!(err, BackendError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_run_submits_polls_and_fetches_over_http() {
        let mut server = mockito::Server::new_async().await;

        let submit = server
            .mock("POST", "/v1/dubbing")
            .match_header(API_KEY_HEADER, "test_key")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file"; filename="nicole.mp3""#.to_string()),
                Matcher::Regex("name=\"target_lang\"\r\n\r\nes\r\n".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"dubbing_id": "dub-123"}).to_string())
            .expect(1)
            .create_async()
            .await;
        let status = server
            .mock("GET", "/v1/dubbing/dub-123")
            .match_header(API_KEY_HEADER, "test_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(metadata("dubbed"))
            .expect(1)
            .create_async()
            .await;
        let audio = server
            .mock("GET", "/v1/dubbing/dub-123/audio/es")
            .match_header(API_KEY_HEADER, "test_key")
            .with_status(200)
            .with_body(b"dubbed audio".as_slice())
            .expect(1)
            .create_async()
            .await;

        let config = PollerConfig::new()
            .with_poll_interval(Duration::from_millis(10))
            .with_max_wait(Duration::from_secs(5));
        let poller = JobPoller::new(Arc::new(backend_for(&server)), config);

        let artifact = poller
            .run(
                b"ID3 audio".to_vec(),
                "nicole.mp3",
                TargetLanguage::parse("es").unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(artifact.job_id, "dub-123");
        assert_eq!(artifact.bytes, b"dubbed audio");
        assert_eq!(artifact.status_queries, 1);
        submit.assert_async().await;
        status.assert_async().await;
        audio.assert_async().await;
    }
}
