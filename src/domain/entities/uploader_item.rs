//! # UploaderItem Value Object
//!
//! 進行中のアップロードをコンテンツハッシュで識別するバリューオブジェクト

use sha2::{Digest, Sha256};
use std::fmt;

/// 進行中アップロードの識別子
///
/// 改行で連結したログ全文のハッシュを持つ。等価性はハッシュの等価性。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UploaderItem {
    hash: String,
}

impl UploaderItem {
    /// 連結済みのログ全文から識別子を作成
    pub fn from_log(log: &str) -> Self {
        Self {
            hash: hex::encode(Sha256::digest(log.as_bytes())),
        }
    }

    /// テキスト行を改行で連結し、その全文から識別子を作成
    pub fn from_lines(lines: &[String]) -> Self {
        Self::from_log(&lines.join("\n"))
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for UploaderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hash)
    }
}
