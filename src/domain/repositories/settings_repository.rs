//! # Settings Repository Trait
//!
//! 永続化された設定（アップロードトークン）の読み取りを抽象化

use async_trait::async_trait;

/// 設定リポジトリ
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// リプレイサービスのアップロードトークン
    ///
    /// # Returns
    ///
    /// 未設定（または空文字列）の場合は `None`
    async fn upload_token(&self) -> Option<String>;
}
