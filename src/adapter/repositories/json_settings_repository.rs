//! JSON Settings Repository Implementation
//!
//! SettingsRepositoryのJSON実装（アップロードトークンを設定ファイルから読む）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::repositories::settings_repository::SettingsRepository;

/// JSONファイルベースの設定リポジトリ
///
/// トークンは外部から更新されうるため、毎回ファイルを読み直す
pub struct JsonSettingsRepository {
    path: PathBuf,
}

/// 設定ファイル（JSON永続化用の内部表現）
#[derive(Debug, Default, Deserialize)]
struct SettingsJson {
    #[serde(default)]
    hsreplay_upload_token: Option<String>,
}

impl JsonSettingsRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// ファイルから設定を読み込む（同期処理）
    fn load_sync(path: &Path) -> Result<SettingsJson> {
        if !path.exists() {
            return Ok(SettingsJson::default());
        }

        let content = fs::read_to_string(path).context("Failed to read settings file")?;
        serde_json::from_str(&content).context("Failed to parse settings JSON")
    }

    async fn load(&self) -> Result<SettingsJson> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::load_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

#[async_trait]
impl SettingsRepository for JsonSettingsRepository {
    async fn upload_token(&self) -> Option<String> {
        match self.load().await {
            Ok(settings) => settings
                .hsreplay_upload_token
                .filter(|token| !token.trim().is_empty()),
            Err(e) => {
                warn!("Can not load settings from {}: {:#}", self.path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_token_present() {
        let file = settings_file(r#"{"hsreplay_upload_token": "abc-123", "theme": "dark"}"#);
        let repo = JsonSettingsRepository::new(file.path().to_path_buf());

        assert_eq!(repo.upload_token().await.as_deref(), Some("abc-123"));
    }

    #[tokio::test]
    async fn test_token_absent() {
        let file = settings_file(r#"{"theme": "dark"}"#);
        let repo = JsonSettingsRepository::new(file.path().to_path_buf());

        assert_eq!(repo.upload_token().await, None);
    }

    #[tokio::test]
    async fn test_blank_token_is_absent() {
        let file = settings_file(r#"{"hsreplay_upload_token": "  "}"#);
        let repo = JsonSettingsRepository::new(file.path().to_path_buf());

        assert_eq!(repo.upload_token().await, None);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let repo = JsonSettingsRepository::new(PathBuf::from("/nonexistent/settings.json"));
        assert_eq!(repo.upload_token().await, None);
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let file = settings_file("{not json");
        let repo = JsonSettingsRepository::new(file.path().to_path_buf());

        assert_eq!(repo.upload_token().await, None);
    }

    #[tokio::test]
    async fn test_token_is_reread() {
        let file = settings_file(r#"{}"#);
        let repo = JsonSettingsRepository::new(file.path().to_path_buf());
        assert_eq!(repo.upload_token().await, None);

        fs::write(file.path(), r#"{"hsreplay_upload_token": "later"}"#).unwrap();

        assert_eq!(repo.upload_token().await.as_deref(), Some("later"));
    }
}
