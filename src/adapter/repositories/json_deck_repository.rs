//! JSON Deck Repository Implementation
//!
//! DeckRepositoryのJSON実装（デッキごとに1ファイル）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::game_context::DeckRecord;
use crate::domain::repositories::deck_repository::DeckRepository;

/// JSONファイルベースのデッキリポジトリ
pub struct JsonDeckRepository {
    dir: PathBuf,
}

impl JsonDeckRepository {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// デッキIDからファイル名を作る（パス区切りなどは `_` に置き換える）
    pub fn file_name(deck_id: &str) -> String {
        let safe: String = deck_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}.json", safe)
    }

    /// ファイルにデッキを保存する（同期処理）
    fn save_sync(dir: &Path, deck: &DeckRecord) -> Result<PathBuf> {
        fs::create_dir_all(dir).context("Failed to create deck directory")?;

        let path = dir.join(Self::file_name(&deck.id));
        let json = serde_json::to_string_pretty(deck).context("Failed to serialize deck")?;
        fs::write(&path, json).context("Failed to write deck file")?;

        Ok(path)
    }
}

#[async_trait]
impl DeckRepository for JsonDeckRepository {
    async fn update(&self, deck: &DeckRecord) -> Result<()> {
        let dir = self.dir.clone();
        let deck = deck.clone();
        let path = tokio::task::spawn_blocking(move || Self::save_sync(&dir, &deck))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        info!("Saved deck to {}", path.display());
        Ok(())
    }
}
