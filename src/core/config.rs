use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// Editor boundary settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Quiet period before a URL edit is committed to the graph.
    #[serde(default = "default_url_debounce_ms")]
    pub url_debounce_ms: u64,
    /// Storage key the snapshot is saved under.
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,
}

fn default_url_debounce_ms() -> u64 {
    300
}

fn default_snapshot_key() -> String {
    "workflow".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            url_debounce_ms: default_url_debounce_ms(),
            snapshot_key: default_snapshot_key(),
        }
    }
}

impl EditorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, WorkflowError> {
        toml::from_str(content).map_err(|e| WorkflowError::ConfigError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.url_debounce_ms, 300);
        assert_eq!(config.snapshot_key, "workflow");
    }

    #[test]
    fn test_from_toml_partial() {
        let config = EditorConfig::from_toml_str("url_debounce_ms = 50").unwrap();
        assert_eq!(config.url_debounce_ms, 50);
        assert_eq!(config.snapshot_key, "workflow");
    }

    #[test]
    fn test_from_toml_empty() {
        assert_eq!(EditorConfig::from_toml_str("").unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = EditorConfig::from_toml_str("url_debounce_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, WorkflowError::ConfigError(_)));
    }
}
