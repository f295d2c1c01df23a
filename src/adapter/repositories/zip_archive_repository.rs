//! Zip Archive Repository Implementation
//!
//! ArchiveExtractorのzip実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::domain::repositories::archive_repository::{ArchiveExtractor, ExtractedEntry};

/// zipアーカイブの展開
pub struct ZipArchiveRepository;

impl ZipArchiveRepository {
    pub fn new() -> Self {
        Self
    }

    /// zipのDOS形式の日時を変換する（範囲外なら `None`）
    pub fn entry_time(time: zip::DateTime) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(time.year().into(), time.month().into(), time.day().into())?
            .and_hms_opt(time.hour().into(), time.minute().into(), time.second().into())
    }

    /// アーカイブ内のファイル一覧と記録された更新日時
    fn list_entries(zip: &mut zip::ZipArchive<File>) -> Result<Vec<ExtractedEntry>> {
        let mut entries = Vec::with_capacity(zip.len());
        for i in 0..zip.len() {
            let entry = zip.by_index(i).context("Failed to read zip entry")?;
            if entry.is_dir() {
                continue;
            }
            entries.push(ExtractedEntry {
                name: entry.name().to_string(),
                modified: entry.last_modified().and_then(Self::entry_time),
            });
        }
        Ok(entries)
    }

    /// アーカイブを展開する（同期処理）
    fn extract_sync(archive: &Path, destination: &Path) -> Result<Vec<ExtractedEntry>> {
        let file = File::open(archive)
            .with_context(|| format!("Failed to open archive: {}", archive.display()))?;
        let mut zip = zip::ZipArchive::new(file).context("Failed to read zip archive")?;
        let entries = Self::list_entries(&mut zip)?;

        fs::create_dir_all(destination).with_context(|| {
            format!("Failed to create directory: {}", destination.display())
        })?;
        zip.extract(destination)
            .context("Failed to extract zip archive")?;

        info!(
            "Extracted {} entries from {} into {}",
            zip.len(),
            archive.display(),
            destination.display()
        );
        Ok(entries)
    }
}

#[async_trait]
impl ArchiveExtractor for ZipArchiveRepository {
    async fn extract(&self, archive: &Path, destination: &Path) -> Result<Vec<ExtractedEntry>> {
        let archive: PathBuf = archive.to_path_buf();
        let destination: PathBuf = destination.to_path_buf();
        tokio::task::spawn_blocking(move || Self::extract_sync(&archive, &destination))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

impl Default for ZipArchiveRepository {
    fn default() -> Self {
        Self::new()
    }
}
