//! # Archive Repository Trait
//!
//! ログを含むアーカイブの展開を抽象化

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::path::Path;

/// 展開されたファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntry {
    /// アーカイブ内のパス
    pub name: String,
    /// アーカイブに記録された更新日時（ローカル時刻）
    pub modified: Option<NaiveDateTime>,
}

/// アーカイブ展開
#[async_trait]
pub trait ArchiveExtractor: Send + Sync {
    /// アーカイブを指定ディレクトリに展開する
    ///
    /// # Arguments
    ///
    /// * `archive` - アーカイブファイルのパス
    /// * `destination` - 展開先ディレクトリ（存在しなければ作成する）
    ///
    /// # Returns
    ///
    /// 展開したファイルの一覧（ディレクトリは含まない）
    ///
    /// # Errors
    ///
    /// アーカイブが読めない、または展開に失敗した場合にエラーを返す
    async fn extract(&self, archive: &Path, destination: &Path) -> Result<Vec<ExtractedEntry>>;
}
