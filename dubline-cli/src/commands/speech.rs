//! One-shot transformation handlers
//!
//! Each command loads its input, makes a single request and writes the
//! returned audio.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dubline_client::input::InputSource;
use dubline_core::dto::speech::{SpeechToSpeechOptions, TextToSpeechRequest};
use tracing::info;

use super::resolve_voice;
use crate::config::Config;
use crate::output::write_audio;

/// Synthesize text into `output`
pub async fn text_to_speech(
    config: &Config,
    voice: &str,
    text: Option<String>,
    file: Option<PathBuf>,
    model: Option<String>,
    output: &Path,
) -> Result<()> {
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => anyhow::bail!("Provide --text or --file"),
    };

    let client = config.speech_client()?;
    let voice_id = resolve_voice(&client, voice).await?;

    let mut req = TextToSpeechRequest::new(text);
    if let Some(model) = model {
        req = req.with_model(model);
    }

    info!("Generating audio with voice {}", voice_id);
    let audio = client
        .text_to_speech(&voice_id, req)
        .await
        .context("Text-to-speech failed")?;

    write_audio(output, &audio).await
}

/// Convert the voice in `input` to `voice`
pub async fn voice_change(
    config: &Config,
    voice: &str,
    input: &str,
    model: Option<String>,
    output: &Path,
) -> Result<()> {
    let client = config.speech_client()?;
    let voice_id = resolve_voice(&client, voice).await?;

    let source = InputSource::parse(input);
    let loaded = source
        .load(&reqwest::Client::new(), "audio.mp3")
        .await
        .with_context(|| format!("Failed to load input {}", source))?;

    let mut options = SpeechToSpeechOptions::default();
    if let Some(model) = model {
        options.model_id = model;
    }

    info!("Transforming {} with voice {}", loaded.file_name, voice_id);
    let audio = client
        .speech_to_speech(&voice_id, loaded.bytes, &loaded.file_name, options)
        .await
        .context("Voice conversion failed")?;

    write_audio(output, &audio).await
}

/// Isolate the voice in `input`
pub async fn isolate(config: &Config, input: &str, output: &Path) -> Result<()> {
    let client = config.speech_client()?;

    let source = InputSource::parse(input);
    let loaded = source
        .load(&reqwest::Client::new(), "audio.mp3")
        .await
        .with_context(|| format!("Failed to load input {}", source))?;

    info!("Isolating voice in {}", loaded.file_name);
    let audio = client
        .isolate_audio(loaded.bytes, &loaded.file_name)
        .await
        .context("Voice isolation failed")?;

    write_audio(output, &audio).await
}
