use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::source::{DEFAULT_DAILY_PATH, DEFAULT_HISTORY_PATH};

fn default_base_url() -> String {
    // Local static server publishing the archive written by `karat update`
    "http://localhost:8000".to_string()
}

fn default_history_path() -> String {
    DEFAULT_HISTORY_PATH.to_string()
}

fn default_archive_dir() -> PathBuf {
    PathBuf::from("./api")
}

fn default_history_limit() -> usize {
    30
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SourcesConfig {
    /// Base URL the rate documents are served from.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// History document path relative to `base_url`, or an absolute URL.
    #[serde(default = "default_history_path")]
    pub history_path: String,

    /// Daily document path template (`{date}` expands to `YYYY-MM-DD`).
    /// Setting this switches the widget to dual-source mode: today's
    /// prices come from the daily document, history supplies the previous
    /// day.
    #[serde(default)]
    pub daily_path: Option<String>,

    /// Upstream rates document `karat update` pulls from.
    #[serde(default)]
    pub upstream_url: Option<String>,
}

impl SourcesConfig {
    pub fn daily_path_or_default(&self) -> &str {
        self.daily_path.as_deref().unwrap_or(DEFAULT_DAILY_PATH)
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        SourcesConfig {
            base_url: default_base_url(),
            history_path: default_history_path(),
            daily_path: None,
            upstream_url: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Directory `karat update` writes daily documents and history.json
    /// into.
    #[serde(default = "default_archive_dir")]
    pub archive_dir: PathBuf,

    /// Number of most recent days kept in history.json.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            sources: SourcesConfig::default(),
            archive_dir: default_archive_dir(),
            history_limit: default_history_limit(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location. A missing file is not
    /// an error; the widget renders fine with built-in defaults.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "karat")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
sources:
  base_url: "http://example.com/gold"
  history_path: "data/history.json"
archive_dir: "./rates"
history_limit: 14
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.sources.base_url, "http://example.com/gold");
        assert_eq!(config.sources.history_path, "data/history.json");
        assert!(config.sources.daily_path.is_none());
        assert_eq!(config.archive_dir, PathBuf::from("./rates"));
        assert_eq!(config.history_limit, 14);

        let yaml_str_with_daily = r#"
sources:
  daily_path: "api/{date}.json"
  upstream_url: "http://example.com/today.json"
"#;
        let config_with_daily: AppConfig = serde_yaml::from_str(yaml_str_with_daily).unwrap();
        assert_eq!(
            config_with_daily.sources.daily_path.as_deref(),
            Some("api/{date}.json")
        );
        assert_eq!(
            config_with_daily.sources.upstream_url.as_deref(),
            Some("http://example.com/today.json")
        );
        // Unset fields fall back to defaults
        assert_eq!(config_with_daily.sources.history_path, "api/history.json");
        assert_eq!(config_with_daily.history_limit, 30);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.sources.base_url, "http://localhost:8000");
        assert_eq!(config.sources.history_path, "api/history.json");
        assert_eq!(config.sources.daily_path_or_default(), "api/{date}.json");
        assert_eq!(config.archive_dir, PathBuf::from("./api"));
        assert_eq!(config.history_limit, 30);
    }
}
