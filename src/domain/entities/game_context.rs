//! # Game Context
//!
//! アップロード時に付随させるゲーム・戦績情報
//!
//! デッキや戦績のドメインモデル本体は外部にあり、ここではメタデータ構築に
//! 必要な項目だけを保持する。

use serde::{Deserialize, Serialize};

/// プレイヤー情報
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// ゲーム内のプレイヤーID（1 または 2）
    pub id: u32,
    pub name: Option<String>,
}

/// 対戦そのものの情報
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameContext {
    pub game_type: Option<u32>,
    pub format: Option<u32>,
    pub scenario_id: Option<u32>,
    pub ladder_season: Option<u32>,
    pub spectator_mode: bool,
    /// 自分側のプレイヤーID
    pub friendly_player_id: Option<u32>,
    pub players: Vec<PlayerInfo>,
}

/// デッキ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRecord {
    pub id: String,
    pub name: String,
    /// カードID（枚数分重複する）
    pub cards: Vec<String>,
    /// アップロード済みリプレイのID
    #[serde(default)]
    pub replay_ids: Vec<String>,
}

/// 1試合分の戦績
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticContext {
    pub rank: Option<u32>,
    pub legend_rank: Option<u32>,
    pub stars: Option<u32>,
    /// アップロード成功時に設定されるリプレイID
    pub hsreplay_id: Option<String>,
    pub deck: Option<DeckRecord>,
}
