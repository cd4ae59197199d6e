//! Panel configuration: service endpoints and timing.
//!
//! Resolution order is defaults, then a JSON file, then environment
//! overrides. The file lives at `<config dir>/rtwt/config.json` unless a
//! path is given explicitly.

use crate::upload::DEFAULT_UPLOAD_BASE_URL;
use crate::view::DEFAULT_RESET_CLEAR_DELAY;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_RENDER_API_URL: &str = "http://localhost:8011/request";

pub const UPLOAD_URL_ENV: &str = "RTWT_UPLOAD_URL";
pub const RENDER_URL_ENV: &str = "RTWT_RENDER_URL";

const CONFIG_DIR_NAME: &str = "rtwt";
const CONFIG_FILE_NAME: &str = "config.json";

/// Endpoints and timing used by both binaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Base URL of the upload service
    pub upload_base_url: String,
    /// URL render commands are posted to
    pub render_api_url: String,
    /// Delay before a Reset click stops being highlighted
    pub reset_clear_delay_ms: u64,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout_secs: Option<u64>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            upload_base_url: DEFAULT_UPLOAD_BASE_URL.to_string(),
            render_api_url: DEFAULT_RENDER_API_URL.to_string(),
            reset_clear_delay_ms: DEFAULT_RESET_CLEAR_DELAY.as_millis() as u64,
            request_timeout_secs: None,
        }
    }
}

impl PanelConfig {
    /// Default location of the config file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Reads a config file. Missing keys take their default.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Loads the effective configuration.
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies environment-style overrides looked up through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(UPLOAD_URL_ENV).filter(|s| !s.is_empty()) {
            self.upload_base_url = url;
        }
        if let Some(url) = lookup(RENDER_URL_ENV).filter(|s| !s.is_empty()) {
            self.render_api_url = url;
        }
    }

    pub fn reset_clear_delay(&self) -> Duration {
        Duration::from_millis(self.reset_clear_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = PanelConfig::default();
        assert_eq!(config.upload_base_url, "http://localhost:8080");
        assert_eq!(config.reset_clear_delay(), Duration::from_millis(150));
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_partial_file() {
        let path = std::env::temp_dir().join("rtwt_config_partial_test.json");
        std::fs::write(&path, r#"{"render_api_url": "http://render:9000/request", "request_timeout_secs": 5}"#).unwrap();

        let config = PanelConfig::from_file(&path).unwrap();
        assert_eq!(config.render_api_url, "http://render:9000/request");
        assert_eq!(config.upload_base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = std::env::temp_dir().join("rtwt_config_does_not_exist.json");
        assert!(PanelConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [(UPLOAD_URL_ENV, "http://uploads:8080"), (RENDER_URL_ENV, "")]
            .into_iter()
            .collect();
        let mut config = PanelConfig::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.upload_base_url, "http://uploads:8080");
        assert_eq!(config.render_api_url, DEFAULT_RENDER_API_URL);
    }
}
