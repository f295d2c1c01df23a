//! # Upload Configuration DTO
//!
//! アップロード設定のData Transfer Object

use std::path::PathBuf;
use std::time::Duration;

/// 各フェーズのデフォルトのタイムアウト
pub const DEFAULT_PHASE_TIMEOUT: Duration = Duration::from_secs(30);

/// アップロード設定
///
/// リプレイサービスへのアップロードに必要な設定情報
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// 第1フェーズ（メタデータ送信）のエンドポイント
    pub upload_url: String,
    /// APIキー（`X-Api-Key` ヘッダー）
    pub api_key: String,
    /// 各フェーズのタイムアウト
    pub phase_timeout: Duration,
    /// アーカイブの展開先の親ディレクトリ
    pub scratch_dir: PathBuf,
}

impl UploadConfig {
    /// 新しいアップロード設定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use std::time::Duration;
    /// use replaysync::application::dto::upload_config::UploadConfig;
    ///
    /// let config = UploadConfig::new(
    ///     "https://upload.hsreplay.net/api/v1/replay/upload/request".to_string(),
    ///     "my-api-key".to_string(),
    /// )
    /// .with_phase_timeout(Duration::from_secs(10));
    ///
    /// assert_eq!(config.phase_timeout, Duration::from_secs(10));
    /// assert!(config.scratch_dir.ends_with("replaysync"));
    /// ```
    pub fn new(upload_url: String, api_key: String) -> Self {
        Self {
            upload_url,
            api_key,
            phase_timeout: DEFAULT_PHASE_TIMEOUT,
            scratch_dir: std::env::temp_dir().join("replaysync"),
        }
    }

    pub fn with_phase_timeout(mut self, timeout: Duration) -> Self {
        self.phase_timeout = timeout;
        self
    }

    pub fn with_scratch_dir(mut self, dir: PathBuf) -> Self {
        self.scratch_dir = dir;
        self
    }
}
