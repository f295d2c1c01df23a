//! Logging Setup
//!
//! env_logger の初期化。ログディレクトリが設定されている場合は日付ごとのファイルに出力する

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use log::warn;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// ログファイルの保持日数
pub const MAX_LOG_AGE_DAYS: i64 = 5;
/// ログファイルの最大サイズ
pub const MAX_LOG_FILE_SIZE: u64 = 10 * 1024 * 1024;

const LOG_FILE_DATE_FORMAT: &str = "%Y-%m-%d";

/// 日付ごとのログファイルのパス
pub fn log_file_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}.log", date.format(LOG_FILE_DATE_FORMAT)))
}

/// 古いログ・大きすぎるログ・名前が日付でないログを削除する
///
/// # Returns
///
/// 削除したファイルのパス
pub fn prune_logs(dir: &Path, today: NaiveDate) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(removed),
        Err(e) => return Err(e).context("Failed to read log directory"),
    };

    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("log") {
            continue;
        }

        if should_prune(&path, today) {
            match fs::remove_file(&path) {
                Ok(()) => removed.push(path),
                Err(e) => warn!("Can not remove log file {}: {}", path.display(), e),
            }
        }
    }

    Ok(removed)
}

fn should_prune(path: &Path, today: NaiveDate) -> bool {
    let date = path
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| NaiveDate::parse_from_str(s, LOG_FILE_DATE_FORMAT).ok());

    let Some(date) = date else {
        return true;
    };
    if (today - date).num_days() > MAX_LOG_AGE_DAYS {
        return true;
    }

    fs::metadata(path)
        .map(|m| m.len() > MAX_LOG_FILE_SIZE)
        .unwrap_or(false)
}

/// ロガーを初期化する
///
/// `RUST_LOG` でレベルを制御する。`log_dir` が指定された場合は
/// 古いログを整理してから当日のファイルに追記する
pub fn init(log_dir: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();

    if let Some(dir) = log_dir {
        let today = Local::now().date_naive();
        prune_logs(dir, today)?;
        fs::create_dir_all(dir).context("Failed to create log directory")?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file_path(dir, today))
            .context("Failed to open log file")?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Failed to initialize logger")
}
