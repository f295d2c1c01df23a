//! # Upload Repository Trait
//!
//! リプレイサービスへのアップロード（2フェーズプロトコル）を抽象化

use async_trait::async_trait;

use crate::domain::entities::upload_metadata::UploadMetadata;
use crate::domain::entities::upload_result::UploadError;

/// 第1フェーズ成功時の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedUpload {
    /// 公開リプレイID
    pub short_id: String,
    /// ログ本体の送信先
    pub put_url: String,
    /// 第2フェーズ（本体送信）が失敗した場合の警告
    pub payload_warning: Option<String>,
}

impl StagedUpload {
    pub fn new(short_id: String, put_url: String) -> Self {
        Self {
            short_id,
            put_url,
            payload_warning: None,
        }
    }

    /// 第2フェーズまで完了したかどうか
    pub fn is_complete(&self) -> bool {
        self.payload_warning.is_none()
    }
}

/// アップロードリポジトリ
#[async_trait]
pub trait UploadRepository: Send + Sync {
    /// メタデータとログ本体をアップロードする
    ///
    /// # Arguments
    ///
    /// * `metadata` - 第1フェーズで送信するメタデータ
    /// * `log` - 改行で連結したログ全文
    /// * `token` - アップロードトークン
    ///
    /// # Returns
    ///
    /// 第1フェーズの結果。第2フェーズの失敗は `payload_warning` に入る
    ///
    /// # Errors
    ///
    /// 第1フェーズが失敗した場合、またはレスポンスに必要な項目がない場合に
    /// `UploadError::ProtocolFailure` を返す
    async fn upload(
        &self,
        metadata: &UploadMetadata,
        log: &str,
        token: &str,
    ) -> Result<StagedUpload, UploadError>;
}
