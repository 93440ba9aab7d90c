//! Runtime settings for the panel.
//!
//! Every field has a default so an empty JSON object (or none at all) yields a
//! working configuration.

use serde::{Deserialize, Serialize};

use crate::error::{PanelError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    /// When false every logging call is dropped silently.
    pub enabled: bool,
    /// Controls `group` / `group_end` bracketing only.
    pub grouping: bool,
    pub max_history: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            grouping: true,
            max_history: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelConfig {
    /// Prefix put in front of every entity endpoint, e.g. `https://cms.example.org`.
    /// Empty means same origin.
    pub api_base: String,
    pub toast_duration_ms: u32,
    pub logger: LoggerConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            toast_duration_ms: 3000,
            logger: LoggerConfig::default(),
        }
    }
}

impl PanelConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|e| PanelError::Config(e.to_string()))
    }

    /// Joins `api_base` and an endpoint path without doubling the slash.
    pub fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        if base.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", base, path.trim_start_matches('/'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_input_yields_defaults() {
        assert_eq!(PanelConfig::from_json("  ").unwrap(), PanelConfig::default());
        assert_eq!(PanelConfig::from_json("{}").unwrap(), PanelConfig::default());
    }

    #[rstest]
    fn partial_logger_section_keeps_other_defaults() {
        let config = PanelConfig::from_json(r#"{"logger": {"grouping": false}}"#).unwrap();

        assert!(config.logger.enabled);
        assert!(!config.logger.grouping);
        assert_eq!(config.logger.max_history, 1000);
        assert_eq!(config.toast_duration_ms, 3000);
    }

    #[rstest]
    fn malformed_json_is_a_config_error() {
        let err = PanelConfig::from_json("{apiBase:").unwrap_err();
        assert!(matches!(err, PanelError::Config(_)));
    }

    #[rstest]
    #[case("", "/api/admin/faqs", "/api/admin/faqs")]
    #[case("https://cms.example.org/", "/api/admin/faqs", "https://cms.example.org/api/admin/faqs")]
    #[case("https://cms.example.org", "api/admin/faqs", "https://cms.example.org/api/admin/faqs")]
    fn url_joins_base_and_path(#[case] base: &str, #[case] path: &str, #[case] expected: &str) {
        let config = PanelConfig {
            api_base: base.to_string(),
            ..PanelConfig::default()
        };
        assert_eq!(config.url(path), expected);
    }
}
