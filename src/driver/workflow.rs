//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapter::config::{expand_path, Config};
use crate::adapter::hsreplay::client::ReqwestTransport;
use crate::adapter::hsreplay::protocol_client::UploadProtocolClient;
use crate::adapter::repositories::json_build_repository::JsonBuildRepository;
use crate::adapter::repositories::json_deck_repository::JsonDeckRepository;
use crate::adapter::repositories::json_settings_repository::JsonSettingsRepository;
use crate::adapter::repositories::zip_archive_repository::ZipArchiveRepository;
use crate::application::use_cases::upload_bundle::UploadBundleUseCase;
use crate::application::use_cases::upload_log::{UploadLogUseCase, UploadOptions};
use crate::domain::entities::log_line::RawLogBundle;
use crate::domain::entities::upload_result::UploadResult;
use crate::domain::services::metadata_builder::MetadataBuilder;
use crate::domain::services::upload_deduplicator::UploadDeduplicator;

use super::cli::Args;

/// デッキの保存先（設定されていない場合）
pub const DEFAULT_DECK_DIR: &str = "~/.replaysync/decks";

/// Read an uncompressed log file into lines
pub async fn read_plain_log(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read log file: {}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Replay Upload Workflow
pub struct ReplayUploadWorkflow {
    config: Config,
    bundle_use_case: UploadBundleUseCase<
        UploadProtocolClient,
        JsonSettingsRepository,
        JsonDeckRepository,
        ZipArchiveRepository,
    >,
}

impl ReplayUploadWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Result<Self> {
        let upload_config = config.to_upload_config();
        let scratch_dir = upload_config.scratch_dir.clone();

        // Adapter implementations
        let transport = Arc::new(ReqwestTransport::new()?);
        let upload_repo = Arc::new(UploadProtocolClient::new(transport, upload_config));
        let settings_repo = Arc::new(JsonSettingsRepository::new(config.settings_path()));
        let deck_dir = config
            .deck_dir()
            .unwrap_or_else(|| expand_path(DEFAULT_DECK_DIR));
        let deck_repo = Arc::new(JsonDeckRepository::new(deck_dir));
        let build_repo = Arc::new(JsonBuildRepository::load(
            config.build_dates_path().as_deref(),
            config.product_version_path(),
        )?);

        // Use Cases construction
        let upload_log_use_case = Arc::new(UploadLogUseCase::new(
            upload_repo,
            settings_repo,
            deck_repo,
            MetadataBuilder::new(build_repo),
            Arc::new(UploadDeduplicator::new()),
        ));
        let bundle_use_case = UploadBundleUseCase::new(
            upload_log_use_case,
            Arc::new(ZipArchiveRepository),
            scratch_dir,
        );

        Ok(Self {
            config,
            bundle_use_case,
        })
    }

    /// Execute the upload workflow
    pub async fn execute(&self, args: Args) -> Result<()> {
        info!("Starting replay uploader...");

        println!("✓ Using configuration:");
        println!("  Upload URL: {}", self.config.upload_url);
        println!("  Settings: {}", self.config.settings_path().display());

        let path: PathBuf = expand_path(&args.path);
        let bundle = if args.plain {
            let lines = read_plain_log(&path).await?;
            println!("✓ Read {} lines from {}", lines.len(), path.display());
            RawLogBundle::Lines(lines)
        } else {
            println!("✓ Uploading archive {}", path.display());
            RawLogBundle::Archive(path)
        };

        let options = UploadOptions {
            game_start: args.game_start,
            ..Default::default()
        };

        match self.bundle_use_case.execute(bundle, options).await {
            UploadResult::Successful {
                replay_id,
                payload_warning,
            } => {
                println!("✓ Uploaded replay {}", replay_id);
                if let Some(warning) = payload_warning {
                    println!("  Warning: log payload was not stored: {}", warning);
                }
                println!("✓ Upload complete!");
                Ok(())
            }
            UploadResult::Failed(e) => Err(anyhow::anyhow!("Upload failed: {}", e)),
        }
    }
}
