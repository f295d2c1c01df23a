//! # LogLine Entity
//!
//! ゲームセッションログの1行と、アップロード対象となるログの束

use chrono::{NaiveDateTime, NaiveTime};
use std::path::PathBuf;

/// ゲーム作成イベントを示すマーカー
pub const CREATE_GAME_MARKER: &str = "CREATE_GAME";

/// ログの1行
///
/// 外部のログ収集機構が生成する。生成後は不変で、このクレートでは読み取りのみ行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// 行が記録された時刻（並び順の基準）
    pub time: NaiveDateTime,
    /// 生のログテキスト
    pub line: String,
}

impl LogLine {
    pub fn new(time: NaiveDateTime, line: impl Into<String>) -> Self {
        Self {
            time,
            line: line.into(),
        }
    }

    /// ログ行の先頭にあるタイムスタンプから時刻（時:分:秒）を読み取る
    ///
    /// `D 14:22:10.1234567 GameState.DebugPrintPower() - CREATE_GAME` のように
    /// ログレベルが前置されている形式と、時刻から始まる形式の両方を受け付ける。
    ///
    /// ```
    /// use chrono::NaiveTime;
    /// use replaysync::domain::entities::log_line::LogLine;
    ///
    /// let time = LogLine::parse_time("D 14:22:10.1234567 GameState.DebugPrintPower() - CREATE_GAME");
    /// assert_eq!(time, NaiveTime::from_hms_opt(14, 22, 10));
    ///
    /// assert_eq!(LogLine::parse_time("no timestamp here"), None);
    /// ```
    pub fn parse_time(line: &str) -> Option<NaiveTime> {
        line.split_whitespace().take(2).find_map(|token| {
            let whole_seconds = token.split('.').next()?;
            NaiveTime::parse_from_str(whole_seconds, "%H:%M:%S").ok()
        })
    }

    /// 時刻順に安定ソートしたテキスト行を返す
    pub fn sorted_text(mut lines: Vec<LogLine>) -> Vec<String> {
        lines.sort_by_key(|l| l.time);
        lines.into_iter().map(|l| l.line).collect()
    }
}

/// アップロード対象のログ
///
/// 1回のアップロード呼び出しの間だけ存在する
#[derive(Debug, Clone)]
pub enum RawLogBundle {
    /// `output_log.txt` を含むアーカイブへのパス
    Archive(PathBuf),
    /// 既に正しい順序で並んでいるテキスト行
    Lines(Vec<String>),
    /// タイムスタンプ付きの行（時刻順に並べ替えてから使用する）
    LogLines(Vec<LogLine>),
}
