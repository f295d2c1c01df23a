//! # Upload Log Use Case
//!
//! メモリ上のログ行をリプレイサービスにアップロードするユースケース
//!
//! 1回の試行は `受信 → 検証 → 重複チェック → メタデータ構築 → 送信 → 成功/失敗`
//! の順に進む。重複チェックより前の失敗では登録枠を消費しない。

use chrono::NaiveDateTime;
use log::{error, info, warn};
use std::sync::Arc;

use crate::domain::entities::game_context::{GameContext, StatisticContext};
use crate::domain::entities::upload_result::{UploadError, UploadResult};
use crate::domain::entities::uploader_item::UploaderItem;
use crate::domain::repositories::deck_repository::DeckRepository;
use crate::domain::repositories::settings_repository::SettingsRepository;
use crate::domain::repositories::upload_repository::UploadRepository;
use crate::domain::services::log_validator::LogValidator;
use crate::domain::services::metadata_builder::MetadataBuilder;
use crate::domain::services::upload_deduplicator::UploadDeduplicator;

/// アップロードの付随情報
#[derive(Debug, Default)]
pub struct UploadOptions<'a> {
    /// 試合情報
    pub game: Option<&'a GameContext>,
    /// 戦績。成功時にリプレイIDが書き込まれる
    pub statistic: Option<&'a mut StatisticContext>,
    /// 呼び出し元が既に知っている試合開始日時
    pub game_start: Option<NaiveDateTime>,
    /// ファイル（アーカイブ）由来のログかどうか
    pub from_file: bool,
}

/// ログアップロードユースケース
pub struct UploadLogUseCase<U: UploadRepository, S: SettingsRepository, D: DeckRepository> {
    upload_repository: Arc<U>,
    settings_repository: Arc<S>,
    deck_repository: Arc<D>,
    metadata_builder: MetadataBuilder,
    deduplicator: Arc<UploadDeduplicator>,
}

impl<U: UploadRepository, S: SettingsRepository, D: DeckRepository> UploadLogUseCase<U, S, D> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `upload_repository` - アップロードリポジトリ（2フェーズプロトコル）
    /// * `settings_repository` - アップロードトークンの取得元
    /// * `deck_repository` - 成功時のデッキ保存先
    /// * `metadata_builder` - メタデータ構築サービス
    /// * `deduplicator` - 進行中アップロードの登録簿
    pub fn new(
        upload_repository: Arc<U>,
        settings_repository: Arc<S>,
        deck_repository: Arc<D>,
        metadata_builder: MetadataBuilder,
        deduplicator: Arc<UploadDeduplicator>,
    ) -> Self {
        Self {
            upload_repository,
            settings_repository,
            deck_repository,
            metadata_builder,
            deduplicator,
        }
    }

    /// ログ行をアップロードする
    ///
    /// # Arguments
    ///
    /// * `lines` - 正しい順序に並んだログ行
    /// * `options` - 試合・戦績情報と開始日時
    ///
    /// # Returns
    ///
    /// 最終結果。失敗もエラーではなく `UploadResult::Failed` として返す
    pub async fn execute(&self, lines: Vec<String>, options: UploadOptions<'_>) -> UploadResult {
        match self.run(&lines, options).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Upload failed: {}", e);
                UploadResult::Failed(e)
            }
        }
    }

    async fn run(
        &self,
        lines: &[String],
        options: UploadOptions<'_>,
    ) -> Result<UploadResult, UploadError> {
        LogValidator::validate_for_upload(lines)?;

        let token = self.settings_repository.upload_token().await.ok_or_else(|| {
            error!("Authorization token not set yet");
            UploadError::AuthenticationMissing
        })?;

        let log = lines.join("\n");
        let item = UploaderItem::from_log(&log);

        // ガードがスコープを抜けると、どの終了経路でも登録が解除される
        let _guard = self.deduplicator.begin(item.clone()).ok_or_else(|| {
            info!("{} already in progress", item);
            UploadError::DuplicateInProgress(item.hash().to_string())
        })?;

        let UploadOptions {
            game,
            statistic,
            game_start,
            from_file,
        } = options;

        let metadata =
            self.metadata_builder
                .build(game, statistic.as_deref(), game_start, from_file);
        info!(
            "Uploading {} -> {}",
            item,
            serde_json::to_string(&metadata).unwrap_or_default()
        );

        let staged = self
            .upload_repository
            .upload(&metadata, &log, &token)
            .await?;

        if let Some(warning) = &staged.payload_warning {
            warn!("{} staged as {} but payload upload failed: {}", item, staged.short_id, warning);
        }

        if let Some(statistic) = statistic {
            self.attach_replay(statistic, &staged.short_id).await;
        }

        info!("{} upload done: Success ({})", item, staged.short_id);

        Ok(UploadResult::Successful {
            replay_id: staged.short_id,
            payload_warning: staged.payload_warning,
        })
    }

    /// 戦績にリプレイIDを設定し、デッキがあれば保存する
    async fn attach_replay(&self, statistic: &mut StatisticContext, replay_id: &str) {
        statistic.hsreplay_id = Some(replay_id.to_string());

        if let Some(deck) = statistic.deck.as_mut() {
            deck.replay_ids.push(replay_id.to_string());
            if let Err(e) = self.deck_repository.update(deck).await {
                error!("Can not save deck {}: {:#}", deck.id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::*;
    use crate::domain::entities::game_context::DeckRecord;
    use crate::domain::repositories::upload_repository::StagedUpload;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_upload_success() {
        let upload_repo = Arc::new(RecordingUploadRepository::succeeding("abc123"));
        let fixture = Fixture::new(upload_repo.clone(), Some("token-1"));

        let result = fixture
            .use_case
            .execute(sample_lines(), UploadOptions::default())
            .await;

        assert_eq!(
            result,
            UploadResult::Successful {
                replay_id: "abc123".to_string(),
                payload_warning: None,
            }
        );
        assert_eq!(upload_repo.call_count(), 1);

        let call = upload_repo.last_call().unwrap();
        assert_eq!(call.log, sample_lines().join("\n"));
        assert_eq!(call.token, "token-1");
        assert!(fixture.deduplicator.is_empty());
    }

    #[tokio::test]
    async fn test_upload_sets_statistic_replay_id_and_saves_deck() {
        let upload_repo = Arc::new(RecordingUploadRepository::succeeding("abc123"));
        let fixture = Fixture::new(upload_repo, Some("token"));

        let mut statistic = StatisticContext {
            deck: Some(DeckRecord {
                id: "deck-1".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };

        let result = fixture
            .use_case
            .execute(
                sample_lines(),
                UploadOptions {
                    statistic: Some(&mut statistic),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_success());
        assert_eq!(statistic.hsreplay_id.as_deref(), Some("abc123"));

        let saved = fixture.decks.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, "deck-1");
        assert_eq!(saved[0].replay_ids, vec!["abc123".to_string()]);
    }

    #[tokio::test]
    async fn test_deck_save_failure_does_not_fail_upload() {
        let upload_repo = Arc::new(RecordingUploadRepository::succeeding("abc123"));
        let fixture = Fixture::new(upload_repo, Some("token"));
        fixture.decks.fail_saves();

        let mut statistic = StatisticContext {
            deck: Some(DeckRecord::default()),
            ..Default::default()
        };

        let result = fixture
            .use_case
            .execute(
                sample_lines(),
                UploadOptions {
                    statistic: Some(&mut statistic),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(result.replay_id(), Some("abc123"));
        assert_eq!(statistic.hsreplay_id.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_upload_rejects_multiple_games_without_network() {
        let upload_repo = Arc::new(RecordingUploadRepository::succeeding("abc123"));
        let fixture = Fixture::new(upload_repo.clone(), Some("token"));

        let mut lines = sample_lines();
        lines.push(CREATE_GAME_LINE.to_string());

        let result = fixture
            .use_case
            .execute(lines, UploadOptions::default())
            .await;

        assert_eq!(
            result,
            UploadResult::Failed(UploadError::ValidationFailure(
                "none or multiple games".to_string()
            ))
        );
        assert_eq!(upload_repo.call_count(), 0);
        assert!(fixture.deduplicator.is_empty());
    }

    #[tokio::test]
    async fn test_upload_rejects_missing_marker_without_network() {
        let upload_repo = Arc::new(RecordingUploadRepository::succeeding("abc123"));
        let fixture = Fixture::new(upload_repo.clone(), Some("token"));

        let lines = vec!["D 14:22:09.0 LoadingScreen.OnSceneLoaded()".to_string()];
        let result = fixture
            .use_case
            .execute(lines, UploadOptions::default())
            .await;

        assert!(matches!(
            result,
            UploadResult::Failed(UploadError::ValidationFailure(_))
        ));
        assert_eq!(upload_repo.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_without_token() {
        let upload_repo = Arc::new(RecordingUploadRepository::succeeding("abc123"));
        let fixture = Fixture::new(upload_repo.clone(), None);

        let result = fixture
            .use_case
            .execute(sample_lines(), UploadOptions::default())
            .await;

        assert_eq!(
            result,
            UploadResult::Failed(UploadError::AuthenticationMissing)
        );
        assert_eq!(upload_repo.call_count(), 0);
        assert!(fixture.deduplicator.is_empty());
    }

    #[tokio::test]
    async fn test_upload_duplicate_in_progress() {
        let upload_repo = Arc::new(RecordingUploadRepository::succeeding("abc123"));
        let fixture = Fixture::new(upload_repo.clone(), Some("token"));

        let item = UploaderItem::from_lines(&sample_lines());
        assert!(fixture.deduplicator.try_begin(&item));

        let result = fixture
            .use_case
            .execute(sample_lines(), UploadOptions::default())
            .await;

        assert_eq!(
            result,
            UploadResult::Failed(UploadError::DuplicateInProgress(item.hash().to_string()))
        );
        assert_eq!(upload_repo.call_count(), 0);
        // 重複検出時に2つ目のエントリは追加されず、既存の登録もそのまま
        assert_eq!(fixture.deduplicator.len(), 1);
        assert!(fixture.deduplicator.is_in_progress(&item));
    }

    #[tokio::test]
    async fn test_protocol_failure_releases_slot() {
        let upload_repo = Arc::new(RecordingUploadRepository::failing(
            UploadError::ProtocolFailure("503 Service Unavailable".to_string()),
        ));
        let fixture = Fixture::new(upload_repo.clone(), Some("token"));

        let first = fixture
            .use_case
            .execute(sample_lines(), UploadOptions::default())
            .await;
        assert!(matches!(
            first,
            UploadResult::Failed(UploadError::ProtocolFailure(_))
        ));
        assert!(fixture.deduplicator.is_empty());

        // 同じ内容の再試行は重複扱いされない
        let second = fixture
            .use_case
            .execute(sample_lines(), UploadOptions::default())
            .await;
        assert!(matches!(
            second,
            UploadResult::Failed(UploadError::ProtocolFailure(_))
        ));
        assert_eq!(upload_repo.call_count(), 2);
    }

    #[tokio::test]
    async fn test_payload_warning_is_surfaced() {
        let mut staged = StagedUpload::new("abc123".to_string(), "https://x/y".to_string());
        staged.payload_warning = Some("payload upload timed out".to_string());
        let upload_repo = Arc::new(RecordingUploadRepository::responding(Ok(staged)));
        let fixture = Fixture::new(upload_repo, Some("token"));

        let result = fixture
            .use_case
            .execute(sample_lines(), UploadOptions::default())
            .await;

        assert_eq!(
            result,
            UploadResult::Successful {
                replay_id: "abc123".to_string(),
                payload_warning: Some("payload upload timed out".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_metadata_uses_game_start_and_file_build() {
        let upload_repo = Arc::new(RecordingUploadRepository::succeeding("abc123"));
        let fixture = Fixture::new(upload_repo.clone(), Some("token"));
        let start = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 22, 10)
            .unwrap();

        fixture
            .use_case
            .execute(
                sample_lines(),
                UploadOptions {
                    game_start: Some(start),
                    from_file: true,
                    ..Default::default()
                },
            )
            .await;

        let call = upload_repo.last_call().unwrap();
        assert_eq!(call.metadata.match_start, Some(start));
        assert_eq!(call.metadata.build, Some(DATE_BUILD));
    }

    #[tokio::test]
    async fn test_metadata_uses_product_build_for_in_memory_logs() {
        let upload_repo = Arc::new(RecordingUploadRepository::succeeding("abc123"));
        let fixture = Fixture::new(upload_repo.clone(), Some("token"));

        fixture
            .use_case
            .execute(sample_lines(), UploadOptions::default())
            .await;

        let call = upload_repo.last_call().unwrap();
        assert_eq!(call.metadata.match_start, None);
        assert_eq!(call.metadata.build, Some(PRODUCT_BUILD));
    }
}
