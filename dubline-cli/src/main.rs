//! Dubline CLI
//!
//! Command-line interface for the speech-processing service: one-shot
//! transformations, voice management, and dubbing jobs that are polled to
//! completion.

mod commands;
mod config;
mod output;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use dubline_client::config::{DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dubline")]
#[command(about = "Speech synthesis, voice conversion and dubbing from the command line", long_about = None)]
struct Cli {
    /// API key of the speech service
    #[arg(long, env = "ELEVENLABS_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Base URL of the speech service
    #[arg(long, env = "DUBLINE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Seconds before a single request to the service is abandoned
    #[arg(long, env = "DUBLINE_REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "dubline_cli=info,dubline_poller=info,dubline_client=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(
        cli.api_key,
        cli.api_url,
        Duration::from_secs(cli.request_timeout),
    )?;

    handle_command(cli.command, &config).await
}
