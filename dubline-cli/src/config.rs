//! Configuration module
//!
//! Gathers the client and poller settings for a CLI invocation.

use std::time::Duration;

use anyhow::{Context, Result};
use dubline_client::{ClientConfig, SpeechClient};
use dubline_poller::PollerConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection settings for the speech service
    pub client: ClientConfig,
    /// Poll loop settings, from the environment unless overridden by flags
    pub poller: PollerConfig,
}

impl Config {
    pub fn new(api_key: String, api_url: String, request_timeout: Duration) -> Result<Self> {
        let client = ClientConfig::new(api_key)
            .with_api_url(api_url)
            .with_request_timeout(request_timeout);
        client.validate().context("Invalid client configuration")?;

        Ok(Self {
            client,
            poller: PollerConfig::from_env(),
        })
    }

    /// Builds the service client shared by a command's requests
    pub fn speech_client(&self) -> Result<SpeechClient> {
        SpeechClient::from_config(&self.client).context("Failed to build HTTP client")
    }
}
