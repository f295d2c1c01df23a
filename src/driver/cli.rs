//! CLI Argument Parsing
//!
//! CLIの引数解析

use chrono::NaiveDateTime;
use clap::Parser;

/// 試合開始日時の入力形式
pub const GAME_START_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// ゲームのセッションログをリプレイサービスにアップロードするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "replaysync")]
#[command(about = "Upload game session logs to the replay service", long_about = None)]
pub struct Args {
    /// Log archive (zip containing output_log.txt), or a plain log with --plain
    pub path: String,

    /// Treat the path as an uncompressed log file
    #[arg(long)]
    pub plain: bool,

    /// Game start (YYYY-MM-DDTHH:MM:SS) used for plain logs
    #[arg(long, value_parser = parse_game_start)]
    pub game_start: Option<NaiveDateTime>,

    /// Config file path
    #[arg(short, long, default_value = "./.replaysync/config.json")]
    pub config: String,
}

fn parse_game_start(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, GAME_START_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM:SS: {}", e))
}
