//! Dubline HTTP Client
//!
//! A typed HTTP client for the hosted speech-processing service.
//!
//! The client covers the asynchronous dubbing workflow (submit, query
//! status, fetch the dubbed audio) and the one-shot transformations
//! (text-to-speech, speech-to-speech, audio isolation, voice design).
//! It holds no global state: construct one and pass it where it is needed.
//!
//! # Example
//!
//! ```no_run
//! use dubline_client::SpeechClient;
//! use dubline_core::dto::speech::TextToSpeechRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SpeechClient::new("https://api.elevenlabs.io", "my-api-key");
//!
//!     let audio = client
//!         .text_to_speech("JBFqnCBsd6RMkjVDRZzb", TextToSpeechRequest::new("Hello there"))
//!         .await?;
//!
//!     println!("Received {} bytes of audio", audio.len());
//!     Ok(())
//! }
//! ```

pub mod config;
mod dubbing;
pub mod error;
pub mod input;
mod speech;
mod voices;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ClientError, Result};

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "xi-api-key";

/// HTTP client for the speech-processing API
///
/// Endpoints are organized into logical groups:
/// - Dubbing jobs (submit, status, dubbed audio)
/// - One-shot transformations (text-to-speech, speech-to-speech, isolation)
/// - Voices (listing, designing previews)
#[derive(Clone)]
pub struct SpeechClient {
    /// Base URL of the service (e.g., "https://api.elevenlabs.io")
    base_url: String,
    /// API key passed through on every request
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl std::fmt::Debug for SpeechClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl SpeechClient {
    /// Create a new speech client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the service API
    /// * `api_key` - Key sent in the `xi-api-key` header
    ///
    /// # Example
    /// ```
    /// use dubline_client::SpeechClient;
    ///
    /// let client = SpeechClient::new("https://api.elevenlabs.io", "my-api-key");
    /// ```
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(base_url, api_key, Client::new())
    }

    /// Create a new speech client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use dubline_client::SpeechClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(120))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = SpeechClient::with_client("https://api.elevenlabs.io", "my-api-key", http_client);
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Create a client from validated configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(
            config.api_url.clone(),
            config.api_key.clone(),
            http_client,
        ))
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .header(API_KEY_HEADER, &self.api_key)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header(API_KEY_HEADER, &self.api_key)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body is binary audio
    async fn handle_bytes_response(&self, response: reqwest::Response) -> Result<Vec<u8>> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }
}

/// Rejects empty audio/video payloads before they are uploaded
pub(crate) fn ensure_payload(payload: &[u8], what: &str) -> Result<()> {
    if payload.is_empty() {
        return Err(ClientError::InvalidRequest(format!("{} payload is empty", what)));
    }
    Ok(())
}

/// Guesses the upload MIME type from a file name
pub(crate) fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        _ => "application/octet-stream",
    }
}

/// Builds a multipart file part with a MIME type derived from the name
pub(crate) fn file_part(bytes: Vec<u8>, file_name: &str) -> Result<reqwest::multipart::Part> {
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime_for(file_name))?;
    Ok(part)
}
