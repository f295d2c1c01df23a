//! Replaysync - Game Session Log Uploader
//!
//! ゲームのセッションログをリプレイサービスにアップロード

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use replaysync::adapter::config::Config;
use replaysync::driver::{logging, Args, ReplayUploadWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;
    logging::init(config.log_dir().as_deref())?;

    // Create workflow with injected dependencies
    let workflow = ReplayUploadWorkflow::new(config)?;

    workflow.execute(args).await
}
