//! # Game Start Resolver
//!
//! 試合開始日時の解決
//!
//! ログ行のタイムスタンプには時刻しか含まれないため、日付はログファイルの
//! 作成日から、時刻はマーカー行から取り、両者を組み合わせる。

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::entities::log_line::LogLine;
use crate::domain::entities::upload_result::UploadError;
use crate::domain::services::log_validator::LogValidator;

/// 試合開始日時の解決サービス
pub struct GameStartResolver;

impl GameStartResolver {
    /// ファイル作成日とマーカー行から試合開始日時を解決する
    ///
    /// # Arguments
    ///
    /// * `file_created` - ログファイルの作成日（取得できなかった場合は `None`）
    /// * `lines` - ログのテキスト行
    ///
    /// # Errors
    ///
    /// 作成日が不明、マーカー行がない、またはマーカー行の時刻が読めない場合に
    /// `TimestampResolutionFailure` を返す
    pub fn resolve(
        file_created: Option<NaiveDate>,
        lines: &[String],
    ) -> Result<NaiveDateTime, UploadError> {
        let date = file_created.ok_or_else(|| {
            UploadError::TimestampResolutionFailure("file creation date unavailable".to_string())
        })?;

        let marker = LogValidator::marker_line(lines).ok_or_else(|| {
            UploadError::TimestampResolutionFailure("game-creation marker not found".to_string())
        })?;

        Self::merge(date, marker)
    }

    /// 日付部分を `date` から、時:分:秒をマーカー行から取って結合する
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use replaysync::domain::services::game_start_resolver::GameStartResolver;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    /// let start = GameStartResolver::merge(
    ///     date,
    ///     "D 14:22:10.1234567 GameState.DebugPrintPower() - CREATE_GAME",
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(start.to_string(), "2024-03-05 14:22:10");
    /// ```
    pub fn merge(date: NaiveDate, marker_line: &str) -> Result<NaiveDateTime, UploadError> {
        let time = LogLine::parse_time(marker_line).ok_or_else(|| {
            UploadError::TimestampResolutionFailure(format!(
                "no timestamp in marker line: {}",
                marker_line
            ))
        })?;

        Ok(date.and_time(time))
    }
}
