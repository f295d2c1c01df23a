//! JSON Build Repository Implementation
//!
//! BuildRepositoryの実装（ビルド配信日の表と、インストール済み製品のバージョンファイル）

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::upload_metadata::BuildDescriptor;
use crate::domain::repositories::build_repository::BuildRepository;

/// ビルド配信日の表の1行
#[derive(Debug, Clone, Deserialize)]
struct BuildDateJson {
    date: NaiveDate,
    build: u32,
}

/// ビルドリポジトリ
pub struct JsonBuildRepository {
    /// 配信日の昇順
    builds: Vec<BuildDescriptor>,
    product_version_path: Option<PathBuf>,
}

impl JsonBuildRepository {
    pub fn new(builds: Vec<BuildDescriptor>, product_version_path: Option<PathBuf>) -> Self {
        let mut builds = builds;
        builds.sort_by_key(|b| b.date);
        Self {
            builds,
            product_version_path,
        }
    }

    /// 配信日の表を読み込んで作成する
    ///
    /// 表のパスが指定されていない場合は空の表を使う
    pub fn load(build_dates_path: Option<&Path>, product_version_path: Option<PathBuf>) -> Result<Self> {
        let builds = match build_dates_path {
            Some(path) => Self::load_build_dates(path)?,
            None => Vec::new(),
        };
        info!("Loaded {} build dates", builds.len());
        Ok(Self::new(builds, product_version_path))
    }

    fn load_build_dates(path: &Path) -> Result<Vec<BuildDescriptor>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read build dates: {}", path.display()))?;
        let rows: Vec<BuildDateJson> =
            serde_json::from_str(&content).context("Failed to parse build dates JSON")?;

        Ok(rows
            .into_iter()
            .map(|row| BuildDescriptor {
                build: row.build,
                date: Some(row.date),
            })
            .collect())
    }

    /// `29.0.3.198037` のようなバージョン文字列の末尾をビルド番号として読む
    pub fn parse_product_version(version: &str) -> Option<u32> {
        version.trim().rsplit('.').next()?.trim().parse().ok()
    }
}

impl BuildRepository for JsonBuildRepository {
    fn by_date(&self, date: NaiveDate) -> Option<BuildDescriptor> {
        self.builds
            .iter()
            .rev()
            .find(|b| b.date.is_some_and(|d| d <= date))
            .copied()
    }

    fn by_product_version(&self) -> Option<BuildDescriptor> {
        let path = self.product_version_path.as_ref()?;
        let version = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Can not read product version {}: {}", path.display(), e);
                return None;
            }
        };

        let build = Self::parse_product_version(version.lines().next().unwrap_or_default())?;
        let date = self
            .builds
            .iter()
            .find(|b| b.build == build)
            .and_then(|b| b.date);

        Some(BuildDescriptor { build, date })
    }
}
