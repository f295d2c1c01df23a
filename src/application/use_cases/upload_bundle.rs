//! # Upload Bundle Use Case
//!
//! アーカイブまたはメモリ上のログをアップロードするユースケース
//!
//! アーカイブの場合は作業ディレクトリに展開して `output_log.txt` を読み込み、
//! ログの日付から試合開始日時を解決してから `UploadLogUseCase` に委譲する。
//! ログの日付はアーカイブに記録された更新日時を優先し、無ければ展開後のファイル作成日を使う。

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use log::{error, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use super::upload_log::{UploadLogUseCase, UploadOptions};
use crate::domain::entities::log_line::{LogLine, RawLogBundle};
use crate::domain::entities::upload_result::{UploadError, UploadResult};
use crate::domain::repositories::archive_repository::{ArchiveExtractor, ExtractedEntry};
use crate::domain::repositories::deck_repository::DeckRepository;
use crate::domain::repositories::settings_repository::SettingsRepository;
use crate::domain::repositories::upload_repository::UploadRepository;
use crate::domain::services::game_start_resolver::GameStartResolver;
use crate::domain::services::log_validator::LogValidator;

/// アーカイブ内のログファイル名
pub const OUTPUT_LOG_FILE: &str = "output_log.txt";

/// バンドルアップロードユースケース
pub struct UploadBundleUseCase<U, S, D, E>
where
    U: UploadRepository,
    S: SettingsRepository,
    D: DeckRepository,
    E: ArchiveExtractor,
{
    upload_log: Arc<UploadLogUseCase<U, S, D>>,
    extractor: Arc<E>,
    scratch_dir: PathBuf,
}

impl<U, S, D, E> UploadBundleUseCase<U, S, D, E>
where
    U: UploadRepository,
    S: SettingsRepository,
    D: DeckRepository,
    E: ArchiveExtractor,
{
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `upload_log` - 委譲先のログアップロードユースケース
    /// * `extractor` - アーカイブ展開の実装
    /// * `scratch_dir` - 展開先の親ディレクトリ（呼び出しごとにサブディレクトリを作る）
    pub fn new(
        upload_log: Arc<UploadLogUseCase<U, S, D>>,
        extractor: Arc<E>,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            upload_log,
            extractor,
            scratch_dir,
        }
    }

    /// 種類に応じてバンドルをアップロードする
    pub async fn execute(&self, bundle: RawLogBundle, options: UploadOptions<'_>) -> UploadResult {
        match bundle {
            RawLogBundle::Archive(path) => self.upload_archive(&path, options).await,
            RawLogBundle::Lines(lines) => self.upload_log.execute(lines, options).await,
            RawLogBundle::LogLines(lines) => {
                self.upload_log
                    .execute(LogLine::sorted_text(lines), options)
                    .await
            }
        }
    }

    /// アップロードし、結果を `completion` にちょうど1回渡す
    pub async fn execute_with<F>(&self, bundle: RawLogBundle, options: UploadOptions<'_>, completion: F)
    where
        F: FnOnce(UploadResult),
    {
        completion(self.execute(bundle, options).await);
    }

    /// アーカイブを展開してアップロードする
    ///
    /// `options` の試合開始日時はファイルから解決した値で上書きされる。
    /// 作業ディレクトリは結果にかかわらず削除する（失敗はログのみ）。
    pub async fn upload_archive(&self, archive: &Path, options: UploadOptions<'_>) -> UploadResult {
        let scratch = self.scratch_dir.join(Uuid::new_v4().to_string());

        let result = match self.prepare_archive(archive, &scratch).await {
            Ok((lines, game_start)) => {
                let options = UploadOptions {
                    game_start: Some(game_start),
                    from_file: true,
                    ..options
                };
                self.upload_log.execute(lines, options).await
            }
            Err(e) => {
                warn!("Upload of {} failed: {}", archive.display(), e);
                UploadResult::Failed(e)
            }
        };

        remove_scratch_dir(scratch).await;
        result
    }

    async fn prepare_archive(
        &self,
        archive: &Path,
        scratch: &Path,
    ) -> Result<(Vec<String>, NaiveDateTime), UploadError> {
        info!("Extracting {} to {}", archive.display(), scratch.display());
        let entries = self
            .extractor
            .extract(archive, scratch)
            .await
            .map_err(|e| {
                UploadError::ExtractionFailure(format!(
                    "Can not unzip {}: {:#}",
                    archive.display(),
                    e
                ))
            })?;

        let output = scratch.join(OUTPUT_LOG_FILE);
        let (content, created) = read_extracted_log(output).await?;
        let log_date = archived_log_date(&entries).or(created);

        let lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        LogValidator::validate_file_lines(&lines)?;

        let game_start = GameStartResolver::resolve(log_date, &lines)?;
        info!("Resolved game start {}", game_start);

        Ok((lines, game_start))
    }
}

/// アーカイブに記録された `output_log.txt` の日付
pub fn archived_log_date(entries: &[ExtractedEntry]) -> Option<NaiveDate> {
    entries
        .iter()
        .find(|entry| entry.name == OUTPUT_LOG_FILE)
        .and_then(|entry| entry.modified)
        .map(|modified| modified.date())
}

/// 展開されたログを読み込み、内容とファイル作成日を返す
async fn read_extracted_log(path: PathBuf) -> Result<(String, Option<NaiveDate>), UploadError> {
    tokio::task::spawn_blocking(move || {
        if !path.is_file() {
            return Err(UploadError::FileNotFound(path));
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            UploadError::ReadFailure(format!("Can not read {}: {}", path.display(), e))
        })?;

        Ok((content, file_creation_date(&path)))
    })
    .await
    .map_err(|e| UploadError::ReadFailure(format!("Failed to spawn blocking task: {}", e)))?
}

/// ファイルの作成日（ローカル日付）
///
/// 作成日時を持たないファイルシステムでは更新日時で代用する
pub fn file_creation_date(path: &Path) -> Option<NaiveDate> {
    let metadata = fs::metadata(path).ok()?;

    let time = match metadata.created() {
        Ok(time) => time,
        Err(e) if e.kind() == io::ErrorKind::Unsupported => metadata.modified().ok()?,
        Err(e) => {
            warn!("Can not read creation date of {}: {}", path.display(), e);
            return None;
        }
    };

    Some(DateTime::<Local>::from(time).date_naive())
}

async fn remove_scratch_dir(dir: PathBuf) {
    match tokio::fs::remove_dir_all(&dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => error!("Can not remove tmp files in {}: {}", dir.display(), e),
    }
}
