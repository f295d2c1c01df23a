//! # UploadMetadata Entity
//!
//! アップロード時に送信するメタデータ

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// クライアントのビルド番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDescriptor {
    pub build: u32,
    /// このビルドが配信された日付（分かる場合）
    pub date: Option<NaiveDate>,
}

/// プレイヤーごとのメタデータ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<String>,
}

impl PlayerMetadata {
    fn is_empty(&self) -> bool {
        *self == PlayerMetadata::default()
    }
}

/// アップロードメタデータ
///
/// アップロード試行ごとに新しく構築され、プロトコルクライアントが一度だけ消費する。
/// JSONにシリアライズしたものが第1フェーズのリクエストボディになる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadMetadata {
    /// 試合開始日時（ファイル作成日 + マーカー行の時刻）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_start: Option<NaiveDateTime>,
    /// 解決できたクライアントのビルド番号
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_type: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ladder_season: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub spectator_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_player: Option<u32>,
    #[serde(skip_serializing_if = "PlayerMetadata::is_empty")]
    pub player1: PlayerMetadata,
    #[serde(skip_serializing_if = "PlayerMetadata::is_empty")]
    pub player2: PlayerMetadata,
}

impl UploadMetadata {
    /// プレイヤーIDに対応するメタデータを返す
    pub fn player_mut(&mut self, id: u32) -> Option<&mut PlayerMetadata> {
        match id {
            1 => Some(&mut self.player1),
            2 => Some(&mut self.player2),
            _ => None,
        }
    }
}
