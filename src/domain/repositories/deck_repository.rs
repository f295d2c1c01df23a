//! # Deck Repository Trait
//!
//! デッキの永続化を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::game_context::DeckRecord;

/// デッキリポジトリ
///
/// アップロード成功後、リプレイIDが付与された戦績のデッキを保存する
#[async_trait]
pub trait DeckRepository: Send + Sync {
    /// デッキを保存（既存なら上書き）する
    ///
    /// # Errors
    ///
    /// 書き込みに失敗した場合にエラーを返す
    async fn update(&self, deck: &DeckRecord) -> Result<()>;
}
