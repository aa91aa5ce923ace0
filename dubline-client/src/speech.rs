//! One-shot speech transformation endpoints
//!
//! Each of these is a single request that returns the transformed audio.

use dubline_core::dto::speech::{SpeechToSpeechOptions, TextToSpeechRequest};
use reqwest::multipart::Form;
use tracing::debug;

use crate::SpeechClient;
use crate::error::{ClientError, Result};

impl SpeechClient {
    /// Synthesize speech from text
    ///
    /// # Arguments
    /// * `voice_id` - The voice to speak with
    /// * `req` - Text, model and output format
    ///
    /// # Returns
    /// Encoded audio in the requested output format
    pub async fn text_to_speech(&self, voice_id: &str, req: TextToSpeechRequest) -> Result<Vec<u8>> {
        if req.text.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "text to synthesize is empty".to_string(),
            ));
        }

        debug!(
            "Synthesizing {} characters with voice {} ({})",
            req.text.chars().count(),
            voice_id,
            req.model_id
        );

        let response = self
            .post(&format!("/v1/text-to-speech/{}", voice_id))
            .query(&[("output_format", req.output_format.as_str())])
            .json(&req)
            .send()
            .await?;

        self.handle_bytes_response(response).await
    }

    /// Re-voice recorded speech with another voice
    ///
    /// # Arguments
    /// * `voice_id` - The target voice
    /// * `audio` - Source recording, must be non-empty
    /// * `file_name` - Name sent with the upload
    /// * `options` - Model and output format
    pub async fn speech_to_speech(
        &self,
        voice_id: &str,
        audio: Vec<u8>,
        file_name: &str,
        options: SpeechToSpeechOptions,
    ) -> Result<Vec<u8>> {
        crate::ensure_payload(&audio, "speech-to-speech")?;

        debug!(
            "Converting {} bytes to voice {} ({})",
            audio.len(),
            voice_id,
            options.model_id
        );

        let form = Form::new()
            .part("audio", crate::file_part(audio, file_name)?)
            .text("model_id", options.model_id);

        let response = self
            .post(&format!("/v1/speech-to-speech/{}", voice_id))
            .query(&[("output_format", options.output_format.as_str())])
            .multipart(form)
            .send()
            .await?;

        self.handle_bytes_response(response).await
    }

    /// Strip background noise and music, keeping only the voice
    ///
    /// # Arguments
    /// * `audio` - Source audio or video, must be non-empty
    /// * `file_name` - Name sent with the upload
    pub async fn isolate_audio(&self, audio: Vec<u8>, file_name: &str) -> Result<Vec<u8>> {
        crate::ensure_payload(&audio, "audio isolation")?;

        debug!("Isolating voice in {} bytes ({})", audio.len(), file_name);

        let form = Form::new().part("audio", crate::file_part(audio, file_name)?);

        let response = self
            .post("/v1/audio-isolation")
            .multipart(form)
            .send()
            .await?;

        self.handle_bytes_response(response).await
    }
}
