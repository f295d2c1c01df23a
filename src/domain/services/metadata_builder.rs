//! # Metadata Builder
//!
//! アップロードメタデータの構築

use chrono::NaiveDateTime;
use log::{debug, warn};
use std::sync::Arc;

use crate::domain::entities::game_context::{GameContext, StatisticContext};
use crate::domain::entities::upload_metadata::{BuildDescriptor, UploadMetadata};
use crate::domain::repositories::build_repository::BuildRepository;

/// メタデータ構築サービス
pub struct MetadataBuilder {
    builds: Arc<dyn BuildRepository>,
}

impl MetadataBuilder {
    pub fn new(builds: Arc<dyn BuildRepository>) -> Self {
        Self { builds }
    }

    /// メタデータを構築する
    ///
    /// # Arguments
    ///
    /// * `game` - 試合情報（任意）
    /// * `statistic` - 戦績（任意）。自分側プレイヤーのランクとデッキに使う
    /// * `game_start` - 解決済みの試合開始日時
    /// * `from_file` - ファイル由来のログかどうか（ビルド解決の順序に影響する）
    pub fn build(
        &self,
        game: Option<&GameContext>,
        statistic: Option<&StatisticContext>,
        game_start: Option<NaiveDateTime>,
        from_file: bool,
    ) -> UploadMetadata {
        let mut metadata = UploadMetadata {
            match_start: game_start,
            build: self.resolve_build(game_start, from_file).map(|b| b.build),
            ..Default::default()
        };

        if let Some(game) = game {
            metadata.game_type = game.game_type;
            metadata.format = game.format;
            metadata.scenario_id = game.scenario_id;
            metadata.ladder_season = game.ladder_season;
            metadata.spectator_mode = game.spectator_mode;
            metadata.friendly_player = game.friendly_player_id;

            for player in &game.players {
                match metadata.player_mut(player.id) {
                    Some(slot) => slot.name = player.name.clone(),
                    None => warn!("Ignoring player with unexpected id {}", player.id),
                }
            }
        }

        if let (Some(statistic), Some(friendly)) =
            (statistic, game.and_then(|g| g.friendly_player_id))
        {
            if let Some(slot) = metadata.player_mut(friendly) {
                slot.rank = statistic.rank;
                slot.legend_rank = statistic.legend_rank;
                slot.stars = statistic.stars;
                if let Some(deck) = &statistic.deck {
                    slot.deck = Some(deck.cards.clone());
                    slot.deck_id = Some(deck.id.clone());
                }
            }
        }

        metadata
    }

    /// ビルド番号を3段階で解決する（最初に見つかったものを使う）
    ///
    /// 1. ファイル由来で開始日が分かる場合はその日付
    /// 2. 実行中の製品バージョン
    /// 3. 今日の日付
    pub fn resolve_build(
        &self,
        game_start: Option<NaiveDateTime>,
        from_file: bool,
    ) -> Option<BuildDescriptor> {
        let by_game_date = || {
            game_start
                .filter(|_| from_file)
                .and_then(|start| self.builds.by_date(start.date()))
        };

        let build = by_game_date()
            .or_else(|| self.builds.by_product_version())
            .or_else(|| self.builds.by_current_date());

        match &build {
            Some(b) => debug!("Resolved build {}", b.build),
            None => debug!("Could not resolve build, leaving it unset"),
        }
        build
    }
}
