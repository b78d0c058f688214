use std::fmt;

use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat-completions endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Rows per side included in the prompt.
pub const DEFAULT_SAMPLE_ROWS: usize = 3;

/// Settings for the hosted-model matcher (`[llm]` in the settings file).
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Use the hosted model when an API key is present.
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub sample_rows: usize,
    pub temperature: f64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            sample_rows: DEFAULT_SAMPLE_ROWS,
            temperature: 0.1,
        }
    }
}

impl LlmSettings {
    /// The API key, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// True when the hosted model should be used.
    pub fn is_configured(&self) -> bool {
        self.enabled && self.api_key().is_some()
    }
}

// The API key never reaches logs.
impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("enabled", &self.enabled)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("sample_rows", &self.sample_rows)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_not_configured() {
        let settings = LlmSettings {
            api_key: Some("   ".to_string()),
            ..LlmSettings::default()
        };
        assert!(!settings.is_configured());
        assert_eq!(settings.api_key(), None);
    }

    #[test]
    fn debug_redacts_key() {
        let settings = LlmSettings {
            api_key: Some("sk-secret".to_string()),
            ..LlmSettings::default()
        };
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings: LlmSettings =
            serde_json::from_str(r#"{"model": "local-model"}"#).expect("parse settings");
        assert_eq!(settings.model, "local-model");
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.sample_rows, DEFAULT_SAMPLE_ROWS);
        assert!(settings.enabled);
    }
}
