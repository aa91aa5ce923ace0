//! Voice DTOs

use serde::{Deserialize, Serialize};

use crate::domain::voice::Voice;

/// Minimum length of the sample text used for voice design
pub const MIN_PREVIEW_TEXT_CHARS: usize = 100;

/// Response of the voice listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<Voice>,
}

/// Request to design a voice from a description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePreviewsRequest {
    pub voice_description: String,
    pub text: String,
}

/// Raw preview as returned by the service, audio still base64 encoded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewDto {
    pub audio_base_64: String,
    pub generated_voice_id: String,
    #[serde(default = "default_media_type")]
    pub media_type: String,
    #[serde(default)]
    pub duration_secs: Option<f64>,
}

/// Response of the voice design endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePreviewsResponse {
    pub previews: Vec<PreviewDto>,
    #[serde(default)]
    pub text: Option<String>,
}

fn default_media_type() -> String {
    "audio/mpeg".to_string()
}
