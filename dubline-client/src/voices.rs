//! Voice endpoints

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use dubline_core::domain::voice::{Voice, VoicePreview};
use dubline_core::dto::voice::{
    CreatePreviewsRequest, CreatePreviewsResponse, MIN_PREVIEW_TEXT_CHARS, PreviewDto,
    VoicesResponse,
};

use crate::SpeechClient;
use crate::error::{ClientError, Result};

impl SpeechClient {
    /// List the voices available to the account
    pub async fn list_voices(&self) -> Result<Vec<Voice>> {
        let response = self.get("/v1/voices").send().await?;
        let body: VoicesResponse = self.handle_response(response).await?;
        Ok(body.voices)
    }

    /// Look up a voice by ID or case-insensitive name
    ///
    /// # Returns
    /// The first matching voice, or `None`
    pub async fn find_voice(&self, key: &str) -> Result<Option<Voice>> {
        let voices = self.list_voices().await?;
        Ok(voices.into_iter().find(|v| v.matches(key)))
    }

    /// Generate voice previews from a free-form description
    ///
    /// The sample text must be at least 100 characters long.
    ///
    /// # Returns
    /// The previews with their audio decoded
    pub async fn create_voice_previews(
        &self,
        req: CreatePreviewsRequest,
    ) -> Result<Vec<VoicePreview>> {
        validate_previews_request(&req)?;

        let response = self
            .post("/v1/text-to-voice/create-previews")
            .json(&req)
            .send()
            .await?;

        let body: CreatePreviewsResponse = self.handle_response(response).await?;
        body.previews.into_iter().map(decode_preview).collect()
    }
}

fn validate_previews_request(req: &CreatePreviewsRequest) -> Result<()> {
    if req.voice_description.trim().is_empty() {
        return Err(ClientError::InvalidRequest(
            "voice description is empty".to_string(),
        ));
    }

    let chars = req.text.chars().count();
    if chars < MIN_PREVIEW_TEXT_CHARS {
        return Err(ClientError::InvalidRequest(format!(
            "sample text must be at least {} characters, got {}",
            MIN_PREVIEW_TEXT_CHARS, chars
        )));
    }

    Ok(())
}

fn decode_preview(dto: PreviewDto) -> Result<VoicePreview> {
    let audio = STANDARD
        .decode(dto.audio_base_64.as_bytes())
        .map_err(|e| ClientError::ParseError(format!("Invalid preview audio: {}", e)))?;

    Ok(VoicePreview {
        generated_voice_id: dto.generated_voice_id,
        media_type: dto.media_type,
        audio,
        duration_secs: dto.duration_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(description: &str, text: &str) -> CreatePreviewsRequest {
        CreatePreviewsRequest {
            voice_description: description.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_preview_text_too_short() {
        let err = validate_previews_request(&request("A squeaky mouse", "Hi")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[test]
    fn test_preview_description_required() {
        let text = "a".repeat(MIN_PREVIEW_TEXT_CHARS);
        assert!(validate_previews_request(&request(" ", &text)).is_err());
        assert!(validate_previews_request(&request("A wise old wizard", &text)).is_ok());
    }

    #[test]
    fn test_decode_preview() {
        let dto = PreviewDto {
            audio_base_64: STANDARD.encode([1u8, 2, 3]),
            generated_voice_id: "gen-1".to_string(),
            media_type: "audio/mpeg".to_string(),
            duration_secs: Some(4.5),
        };
        let preview = decode_preview(dto).unwrap();
        assert_eq!(preview.audio, vec![1, 2, 3]);
        assert_eq!(preview.generated_voice_id, "gen-1");
    }

    #[test]
    fn test_decode_preview_rejects_garbage() {
        let dto = PreviewDto {
            audio_base_64: "not base64!!".to_string(),
            generated_voice_id: "gen-1".to_string(),
            media_type: "audio/mpeg".to_string(),
            duration_secs: None,
        };
        assert!(matches!(
            decode_preview(dto),
            Err(ClientError::ParseError(_))
        ));
    }
}
