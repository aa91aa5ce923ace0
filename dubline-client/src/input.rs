//! Input media loading
//!
//! Media to transform can come from a local file or from a plain HTTP(S)
//! URL, such as the public sample clips on the service's CDN.

use std::path::PathBuf;

use reqwest::Client;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Where input media is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Remote file fetched with an unauthenticated GET
    Url(String),
    /// Local file
    Path(PathBuf),
}

/// Media bytes together with the name used when uploading them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedInput {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl InputSource {
    /// Parse a string into an InputSource
    ///
    /// Anything starting with `http://` or `https://` is a URL, everything
    /// else a path.
    pub fn parse(input: &str) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            InputSource::Url(input.to_string())
        } else {
            InputSource::Path(PathBuf::from(input))
        }
    }

    /// File name to send with the upload, falling back to `fallback`
    pub fn file_name(&self, fallback: &str) -> String {
        let candidate = match self {
            InputSource::Url(url) => url
                .split(['?', '#'])
                .next()
                .and_then(|path| path.rsplit('/').next())
                .map(str::to_string),
            InputSource::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
        };

        candidate
            .filter(|name| name.contains('.'))
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Reads the media, rejecting empty files
    pub async fn load(&self, client: &Client, fallback_name: &str) -> Result<LoadedInput> {
        let bytes = match self {
            InputSource::Url(url) => fetch_url(client, url).await?,
            InputSource::Path(path) => tokio::fs::read(path).await?,
        };

        crate::ensure_payload(&bytes, "input")?;

        Ok(LoadedInput {
            file_name: self.file_name(fallback_name),
            bytes,
        })
    }
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSource::Url(url) => write!(f, "{}", url),
            InputSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<&str> for InputSource {
    fn from(s: &str) -> Self {
        InputSource::parse(s)
    }
}

/// Downloads a file over plain HTTP(S) without credentials
pub async fn fetch_url(client: &Client, url: &str) -> Result<Vec<u8>> {
    debug!("Fetching input from {}", url);

    let response = client.get(url).send().await?;
    let status = response.status();

    if !status.is_success() {
        return Err(ClientError::api_error(
            status.as_u16(),
            format!("Failed to download {}", url),
        ));
    }

    Ok(response.bytes().await?.to_vec())
}
