//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod dub;
mod speech;
mod voices;

pub use dub::DubCommands;
pub use voices::VoiceCommands;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Subcommand;
use dubline_client::SpeechClient;

use crate::config::Config;

/// Public sample clip used when no input is given
pub const SAMPLE_AUDIO_URL: &str =
    "https://storage.googleapis.com/eleven-public-cdn/audio/marketing/nicole.mp3";

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize speech from text
    Tts {
        /// Voice name or ID
        #[arg(short, long)]
        voice: String,

        /// Text to speak
        #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Model to synthesize with
        #[arg(long)]
        model: Option<String>,

        /// Where to write the audio
        #[arg(short, long, default_value = "speech.mp3")]
        output: PathBuf,
    },
    /// Re-voice a recording with another voice
    VoiceChange {
        /// Target voice name or ID
        #[arg(short, long)]
        voice: String,

        /// Input file path or URL
        #[arg(short, long, default_value = SAMPLE_AUDIO_URL)]
        input: String,

        /// Model to convert with
        #[arg(long)]
        model: Option<String>,

        /// Where to write the audio
        #[arg(short, long, default_value = "voice_changed.mp3")]
        output: PathBuf,
    },
    /// Keep only the voice, removing background noise and music
    Isolate {
        /// Input file path or URL (audio or video)
        #[arg(short, long)]
        input: String,

        /// Where to write the audio
        #[arg(short, long, default_value = "isolated.mp3")]
        output: PathBuf,
    },
    /// Dubbing jobs
    Dub {
        #[command(subcommand)]
        command: DubCommands,
    },
    /// Voice management
    Voices {
        #[command(subcommand)]
        command: VoiceCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Tts {
            voice,
            text,
            file,
            model,
            output,
        } => speech::text_to_speech(config, &voice, text, file, model, &output).await,
        Commands::VoiceChange {
            voice,
            input,
            model,
            output,
        } => speech::voice_change(config, &voice, &input, model, &output).await,
        Commands::Isolate { input, output } => speech::isolate(config, &input, &output).await,
        Commands::Dub { command } => dub::handle_dub_command(command, config).await,
        Commands::Voices { command } => voices::handle_voice_command(command, config).await,
    }
}

/// Resolves a voice name or ID to a voice ID
pub(crate) async fn resolve_voice(client: &SpeechClient, key: &str) -> Result<String> {
    match client.find_voice(key).await? {
        Some(voice) => Ok(voice.voice_id),
        None => bail!(
            "No voice matches '{}'. Run `dubline voices list` to see available voices.",
            key
        ),
    }
}
