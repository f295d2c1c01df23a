//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::dto::upload_config::UploadConfig;

pub const DEFAULT_UPLOAD_URL: &str = "https://upload.hsreplay.net/api/v1/replay/upload/request";

fn default_upload_url() -> String {
    DEFAULT_UPLOAD_URL.to_string()
}

fn default_phase_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_upload_url")]
    pub upload_url: String,
    pub api_key: String,

    // Settings file holding the upload token
    pub settings_path: String,

    #[serde(default)]
    pub scratch_dir: Option<String>,
    #[serde(default)]
    pub build_dates_path: Option<String>,
    #[serde(default)]
    pub product_version_path: Option<String>,
    #[serde(default)]
    pub deck_dir: Option<String>,
    #[serde(default)]
    pub log_dir: Option<String>,

    #[serde(default = "default_phase_timeout_secs")]
    pub phase_timeout_secs: u64,
}

/// Expands tilde in path
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let path = expand_path(path);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;
        Ok(config)
    }

    /// Build the upload settings used by the application layer
    pub fn to_upload_config(&self) -> UploadConfig {
        let config = UploadConfig::new(self.upload_url.clone(), self.api_key.clone())
            .with_phase_timeout(Duration::from_secs(self.phase_timeout_secs));

        match &self.scratch_dir {
            Some(dir) => config.with_scratch_dir(expand_path(dir)),
            None => config,
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        expand_path(&self.settings_path)
    }

    pub fn build_dates_path(&self) -> Option<PathBuf> {
        self.build_dates_path.as_deref().map(expand_path)
    }

    pub fn product_version_path(&self) -> Option<PathBuf> {
        self.product_version_path.as_deref().map(expand_path)
    }

    pub fn deck_dir(&self) -> Option<PathBuf> {
        self.deck_dir.as_deref().map(expand_path)
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.log_dir.as_deref().map(expand_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_minimal_config() {
        let file = write_config(r#"{"api_key": "key", "settings_path": "/etc/replaysync/settings.json"}"#);

        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.upload_url, DEFAULT_UPLOAD_URL);
        assert_eq!(config.api_key, "key");
        assert_eq!(config.phase_timeout_secs, 30);
        assert!(config.scratch_dir.is_none());
        assert!(config.build_dates_path().is_none());
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"{
                "upload_url": "https://example.com/upload",
                "api_key": "key",
                "settings_path": "/tmp/settings.json",
                "scratch_dir": "/tmp/scratch",
                "build_dates_path": "/tmp/builds.json",
                "product_version_path": "/tmp/version.txt",
                "deck_dir": "/tmp/decks",
                "log_dir": "/tmp/logs",
                "phase_timeout_secs": 5
            }"#,
        );

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        let upload = config.to_upload_config();

        assert_eq!(upload.upload_url, "https://example.com/upload");
        assert_eq!(upload.phase_timeout, Duration::from_secs(5));
        assert_eq!(upload.scratch_dir, PathBuf::from("/tmp/scratch"));
        assert_eq!(config.deck_dir(), Some(PathBuf::from("/tmp/decks")));
        assert_eq!(config.log_dir(), Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Config::load("/nonexistent/config.json").is_err());
    }

    #[test]
    fn test_load_missing_api_key() {
        let file = write_config(r#"{"settings_path": "/tmp/settings.json"}"#);
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_expand_path_absolute() {
        assert_eq!(expand_path("/absolute/path"), PathBuf::from("/absolute/path"));
    }

    #[cfg(unix)]
    #[test]
    fn test_expand_path_with_tilde() {
        let home = std::env::var("HOME")
            .expect("HOME environment variable should be set on Unix systems");
        assert_eq!(
            expand_path("~/.replaysync/settings.json"),
            PathBuf::from(format!("{}/.replaysync/settings.json", home))
        );
    }
}
