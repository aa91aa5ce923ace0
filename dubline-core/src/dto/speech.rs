//! Speech transformation DTOs

use serde::{Deserialize, Serialize};

/// Model used for text-to-speech unless overridden
pub const DEFAULT_TTS_MODEL: &str = "eleven_multilingual_v2";

/// Model used for speech-to-speech unless overridden
pub const DEFAULT_STS_MODEL: &str = "eleven_multilingual_sts_v2";

/// Output format requested unless overridden
pub const DEFAULT_OUTPUT_FORMAT: &str = "mp3_44100_128";

/// Request body for text-to-speech
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextToSpeechRequest {
    pub text: String,
    pub model_id: String,
    #[serde(skip)]
    pub output_format: String,
}

impl TextToSpeechRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_id: DEFAULT_TTS_MODEL.to_string(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }
}

/// Form options for speech-to-speech conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechToSpeechOptions {
    pub model_id: String,
    pub output_format: String,
}

impl Default for SpeechToSpeechOptions {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_STS_MODEL.to_string(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
        }
    }
}
