//! Validation errors for core domain types

use thiserror::Error;

/// Errors raised while constructing or validating domain values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The language code is not in the service's supported dubbing set
    #[error("Unsupported target language: {0}")]
    UnsupportedLanguage(String),

    /// A payload that must carry bytes was empty
    #[error("Payload is empty: {0}")]
    EmptyPayload(String),
}
