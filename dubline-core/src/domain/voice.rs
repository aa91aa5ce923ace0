//! Voice domain types

use serde::{Deserialize, Serialize};

/// A voice available to the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A generated voice preview with its audio already decoded
#[derive(Debug, Clone, PartialEq)]
pub struct VoicePreview {
    pub generated_voice_id: String,
    pub media_type: String,
    pub audio: Vec<u8>,
    pub duration_secs: Option<f64>,
}

impl Voice {
    /// Whether `key` names this voice, by exact ID or case-insensitive name
    pub fn matches(&self, key: &str) -> bool {
        self.voice_id == key || self.name.eq_ignore_ascii_case(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn george() -> Voice {
        Voice {
            voice_id: "JBFqnCBsd6RMkjVDRZzb".to_string(),
            name: "George".to_string(),
            category: Some("premade".to_string()),
            description: None,
        }
    }

    #[test]
    fn test_matches_by_id_or_name() {
        let voice = george();
        assert!(voice.matches("JBFqnCBsd6RMkjVDRZzb"));
        assert!(voice.matches("george"));
        assert!(!voice.matches("Rachel"));
    }
}
