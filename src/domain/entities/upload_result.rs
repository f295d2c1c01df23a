//! # UploadResult Entity
//!
//! アップロードの最終結果とエラー種別

use std::path::PathBuf;
use thiserror::Error;

/// アップロード失敗の種別
///
/// いずれもプロセスにとって致命的ではなく、`UploadResult::Failed` として呼び出し元に返される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Can not extract archive: {0}")]
    ExtractionFailure(String),

    #[error("Can not find {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Can not read log: {0}")]
    ReadFailure(String),

    #[error("Log format not supported: {0}")]
    FormatUnsupported(String),

    #[error("Invalid log: {0}")]
    ValidationFailure(String),

    #[error("Cannot find game start date: {0}")]
    TimestampResolutionFailure(String),

    #[error("Authorization token not set yet")]
    AuthenticationMissing,

    #[error("{0} already in progress")]
    DuplicateInProgress(String),

    #[error("Can not compress log: {0}")]
    CompressionFailure(String),

    #[error("Upload request failed: {0}")]
    ProtocolFailure(String),
}

/// アップロード結果
///
/// アップロード呼び出しごとにちょうど1回だけ返される
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    /// 第1フェーズが成功し、リプレイIDが発行された
    Successful {
        replay_id: String,
        /// 第2フェーズ（本体の送信）が失敗した場合の警告
        payload_warning: Option<String>,
    },
    Failed(UploadError),
}

impl UploadResult {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadResult::Successful { .. })
    }

    pub fn replay_id(&self) -> Option<&str> {
        match self {
            UploadResult::Successful { replay_id, .. } => Some(replay_id),
            UploadResult::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&UploadError> {
        match self {
            UploadResult::Successful { .. } => None,
            UploadResult::Failed(e) => Some(e),
        }
    }

    /// 失敗理由（人間向けの文字列）
    pub fn reason(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }
}

impl From<UploadError> for UploadResult {
    fn from(error: UploadError) -> Self {
        UploadResult::Failed(error)
    }
}
