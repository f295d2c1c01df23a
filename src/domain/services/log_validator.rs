//! # Log Validator
//!
//! ログ行の構造チェック

use crate::domain::entities::log_line::CREATE_GAME_MARKER;
use crate::domain::entities::upload_result::UploadError;

/// 旧形式（PowerTaskList のみのログ）を示す文字列
pub const LEGACY_FORMAT_MARKER: &str = "PowerTaskList.";

/// ログ検証サービス
///
/// いずれのチェックも最初の失敗で打ち切り、その理由を返す
pub struct LogValidator;

impl LogValidator {
    /// ファイルから読み込んだログの検証
    ///
    /// 1. 行が1つ以上ある
    /// 2. 先頭行が `[` で始まらない（未対応の出力形式）
    /// 3. 先頭行に `PowerTaskList.` を含まない（旧形式）
    /// 4. `CREATE_GAME` を含む行がある
    ///
    /// # Errors
    ///
    /// 2, 3 は `FormatUnsupported`、それ以外は `ValidationFailure`
    pub fn validate_file_lines(lines: &[String]) -> Result<(), UploadError> {
        let first = lines
            .first()
            .ok_or_else(|| UploadError::ValidationFailure("empty log".to_string()))?;

        if first.starts_with('[') {
            return Err(UploadError::FormatUnsupported(
                "unsupported output format".to_string(),
            ));
        }

        if first.contains(LEGACY_FORMAT_MARKER) {
            return Err(UploadError::FormatUnsupported(
                "legacy format unsupported".to_string(),
            ));
        }

        if !lines.iter().any(|l| l.contains(CREATE_GAME_MARKER)) {
            return Err(UploadError::ValidationFailure(
                "game-creation marker not found".to_string(),
            ));
        }

        Ok(())
    }

    /// アップロード直前の検証
    ///
    /// 5. `CREATE_GAME` を含む行がちょうど1つ
    /// 6. 連結したテキストが空白だけではない
    ///
    /// # Errors
    ///
    /// いずれも `ValidationFailure`
    pub fn validate_for_upload(lines: &[String]) -> Result<(), UploadError> {
        if Self::marker_count(lines) != 1 {
            return Err(UploadError::ValidationFailure(
                "none or multiple games".to_string(),
            ));
        }

        // 連結後の全文が空白のみ ⇔ 全行が空白のみ
        if lines.iter().all(|l| l.trim().is_empty()) {
            return Err(UploadError::ValidationFailure(
                "log file is empty".to_string(),
            ));
        }

        Ok(())
    }

    /// `CREATE_GAME` を含む行の数
    pub fn marker_count(lines: &[String]) -> usize {
        lines
            .iter()
            .filter(|l| l.contains(CREATE_GAME_MARKER))
            .count()
    }

    /// 最初のマーカー行
    pub fn marker_line(lines: &[String]) -> Option<&str> {
        lines
            .iter()
            .find(|l| l.contains(CREATE_GAME_MARKER))
            .map(String::as_str)
    }
}
