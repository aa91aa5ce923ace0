//! Dubbing API endpoints
//!
//! Dubbing is asynchronous: a submission returns a project ID whose status
//! must be queried until the dubbed audio can be downloaded.

use dubline_core::dto::dubbing::{DubbingMetadata, DubbingResponse};
use reqwest::multipart::Form;
use tracing::debug;

use crate::SpeechClient;
use crate::error::Result;

impl SpeechClient {
    // =============================================================================
    // Dubbing Lifecycle
    // =============================================================================

    /// Submit an audio or video file for dubbing
    ///
    /// # Arguments
    /// * `file` - The media bytes, must be non-empty
    /// * `file_name` - Name sent with the upload, its extension picks the MIME type
    /// * `target_lang` - Language code to dub into
    ///
    /// # Returns
    /// The dubbing project ID and expected duration
    pub async fn submit_dubbing(
        &self,
        file: Vec<u8>,
        file_name: &str,
        target_lang: &str,
    ) -> Result<DubbingResponse> {
        crate::ensure_payload(&file, "dubbing")?;

        debug!(
            "Submitting {} bytes ({}) for dubbing into {}",
            file.len(),
            file_name,
            target_lang
        );

        let form = Form::new()
            .part("file", crate::file_part(file, file_name)?)
            .text("target_lang", target_lang.to_string());

        let response = self.post("/v1/dubbing").multipart(form).send().await?;

        self.handle_response(response).await
    }

    /// Get the metadata, including status, of a dubbing project
    ///
    /// # Arguments
    /// * `dubbing_id` - The project ID returned at submission
    pub async fn get_dubbing(&self, dubbing_id: &str) -> Result<DubbingMetadata> {
        let response = self
            .get(&format!("/v1/dubbing/{}", dubbing_id))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Download the dubbed audio of a finished project
    ///
    /// # Arguments
    /// * `dubbing_id` - The project ID returned at submission
    /// * `language_code` - The target language given at submission
    pub async fn get_dubbed_audio(&self, dubbing_id: &str, language_code: &str) -> Result<Vec<u8>> {
        let response = self
            .get(&format!("/v1/dubbing/{}/audio/{}", dubbing_id, language_code))
            .send()
            .await?;

        self.handle_bytes_response(response).await
    }
}
