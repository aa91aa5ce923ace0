//! Voice command handlers
//!
//! Lists the account's voices and designs new ones from a description.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use dubline_core::domain::voice::Voice;
use dubline_core::dto::voice::{CreatePreviewsRequest, MIN_PREVIEW_TEXT_CHARS};

use crate::config::Config;
use crate::output::write_audio;

/// Sample text spoken by designed voices unless replaced
const DEFAULT_PREVIEW_TEXT: &str = "Every act of kindness, no matter how small, carries value and \
can make a difference. In our interconnected world, these moments of compassion ripple outward, \
touching lives in ways we may never fully understand. Each smile, each helping hand, each word of \
encouragement contributes to a tapestry of positive change that transforms our communities and \
uplifts the human spirit.";

/// Voice subcommands
#[derive(Subcommand)]
pub enum VoiceCommands {
    /// List available voices
    List {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Generate voice previews from a description
    Design {
        /// What the voice should sound like, e.g. "A deep-voiced wise old wizard"
        #[arg(short, long)]
        description: String,

        /// Sample text for the previews (at least 100 characters)
        #[arg(short, long, default_value = DEFAULT_PREVIEW_TEXT)]
        text: String,

        /// Directory for the preview files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
}

/// Handle voice commands
pub async fn handle_voice_command(command: VoiceCommands, config: &Config) -> Result<()> {
    match command {
        VoiceCommands::List { json } => list_voices(config, json).await,
        VoiceCommands::Design {
            description,
            text,
            output_dir,
        } => design_voice(config, description, text, &output_dir).await,
    }
}

async fn list_voices(config: &Config, json: bool) -> Result<()> {
    let client = config.speech_client()?;
    let voices = client.list_voices().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&voices)?);
        return Ok(());
    }

    if voices.is_empty() {
        println!("{}", "No voices found. Check your API key.".yellow());
    } else {
        println!("{}", format!("Found {} voice(s):", voices.len()).bold());
        println!();
        for voice in &voices {
            print_voice_summary(voice);
        }
    }

    Ok(())
}

async fn design_voice(
    config: &Config,
    description: String,
    text: String,
    output_dir: &Path,
) -> Result<()> {
    let chars = text.chars().count();
    println!(
        "{}",
        format!(
            "Character count: {}/{} (minimum required: {})",
            chars, MIN_PREVIEW_TEXT_CHARS, MIN_PREVIEW_TEXT_CHARS
        )
        .dimmed()
    );

    let client = config.speech_client()?;
    let previews = client
        .create_voice_previews(CreatePreviewsRequest {
            voice_description: description,
            text,
        })
        .await
        .context("Failed to generate voice previews")?;

    if previews.is_empty() {
        println!("{}", "The service returned no previews.".yellow());
        return Ok(());
    }

    for (i, preview) in previews.iter().enumerate() {
        println!("{}", format!("Preview {}", i + 1).bold());
        println!("  Voice ID: {}", preview.generated_voice_id.cyan());
        if let Some(secs) = preview.duration_secs {
            println!("  Duration: {:.1}s", secs);
        }
        let path = output_dir.join(format!("preview_{}.mp3", i + 1));
        write_audio(&path, &preview.audio).await?;
    }

    Ok(())
}

/// Print a one-entry voice summary
fn print_voice_summary(voice: &Voice) {
    println!("  {} {}", "▸".cyan(), voice.name.bold());
    println!("    ID:       {}", voice.voice_id.dimmed());
    if let Some(category) = &voice.category {
        println!("    Category: {}", category);
    }
    if let Some(description) = &voice.description {
        println!("    About:    {}", description.dimmed());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preview_text_is_long_enough() {
        assert!(DEFAULT_PREVIEW_TEXT.chars().count() >= MIN_PREVIEW_TEXT_CHARS);
    }
}
