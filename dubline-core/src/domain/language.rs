//! Target languages for dubbing

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// ISO-639-1 (and `fil`) codes the service can dub into
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "hi", "pt", "zh", "es", "fr", "de", "ja", "ar", "ru", "ko", "id", "it", "nl", "tr", "pl",
    "sv", "fil", "ms", "ro", "uk", "el", "cs", "da", "fi", "bg", "hr", "sk", "ta",
];

/// A validated dubbing target language
///
/// Chosen once at submission and supplied again when fetching the dubbed audio.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetLanguage(String);

impl TargetLanguage {
    /// Parses a language code, rejecting codes outside [`SUPPORTED_LANGUAGES`]
    pub fn parse(code: &str) -> Result<Self, CoreError> {
        let normalized = code.trim().to_ascii_lowercase();
        if SUPPORTED_LANGUAGES.contains(&normalized.as_str()) {
            Ok(Self(normalized))
        } else {
            Err(CoreError::UnsupportedLanguage(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TargetLanguage {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TargetLanguage> for String {
    fn from(lang: TargetLanguage) -> Self {
        lang.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported() {
        let lang = TargetLanguage::parse("ES").unwrap();
        assert_eq!(lang.as_str(), "es");
    }

    #[test]
    fn test_parse_unsupported() {
        assert_eq!(
            TargetLanguage::parse("xx"),
            Err(CoreError::UnsupportedLanguage("xx".to_string()))
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Result<TargetLanguage, _> = serde_json::from_str("\"fr\"");
        assert!(ok.is_ok());
        let bad: Result<TargetLanguage, _> = serde_json::from_str("\"klingon\"");
        assert!(bad.is_err());
    }
}
