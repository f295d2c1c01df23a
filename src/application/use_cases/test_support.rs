//! ユースケースのテスト用モックリポジトリ

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::upload_log::UploadLogUseCase;
use crate::domain::entities::game_context::DeckRecord;
use crate::domain::entities::upload_metadata::{BuildDescriptor, UploadMetadata};
use crate::domain::entities::upload_result::UploadError;
use crate::domain::repositories::build_repository::BuildRepository;
use crate::domain::repositories::deck_repository::DeckRepository;
use crate::domain::repositories::settings_repository::SettingsRepository;
use crate::domain::repositories::upload_repository::{StagedUpload, UploadRepository};
use crate::domain::services::metadata_builder::MetadataBuilder;
use crate::domain::services::upload_deduplicator::UploadDeduplicator;

pub const CREATE_GAME_LINE: &str = "D 14:22:10.1234567 GameState.DebugPrintPower() - CREATE_GAME";
pub const DATE_BUILD: u32 = 20457;
pub const PRODUCT_BUILD: u32 = 20970;

pub fn sample_lines() -> Vec<String> {
    vec![
        "D 14:22:09.0000000 LoadingScreen.OnSceneLoaded() - prevMode=HUB currMode=GAMEPLAY".to_string(),
        CREATE_GAME_LINE.to_string(),
        "D 14:22:10.2000000 GameState.DebugPrintPower() -     GameEntity EntityID=1".to_string(),
        "D 14:22:11.0000000 GameState.DebugPrintPower() - TAG_CHANGE Entity=GameEntity tag=TURN value=1".to_string(),
    ]
}

#[derive(Debug, Clone)]
pub struct UploadCall {
    pub metadata: UploadMetadata,
    pub log: String,
    pub token: String,
}

pub struct RecordingUploadRepository {
    response: Result<StagedUpload, UploadError>,
    calls: Mutex<Vec<UploadCall>>,
}

impl RecordingUploadRepository {
    pub fn responding(response: Result<StagedUpload, UploadError>) -> Self {
        Self {
            response,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding(short_id: &str) -> Self {
        Self::responding(Ok(StagedUpload::new(
            short_id.to_string(),
            "https://x/y".to_string(),
        )))
    }

    pub fn failing(error: UploadError) -> Self {
        Self::responding(Err(error))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<UploadCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl UploadRepository for RecordingUploadRepository {
    async fn upload(
        &self,
        metadata: &UploadMetadata,
        log: &str,
        token: &str,
    ) -> Result<StagedUpload, UploadError> {
        self.calls.lock().unwrap().push(UploadCall {
            metadata: metadata.clone(),
            log: log.to_string(),
            token: token.to_string(),
        });
        self.response.clone()
    }
}

pub struct FixedSettingsRepository(pub Option<String>);

#[async_trait]
impl SettingsRepository for FixedSettingsRepository {
    async fn upload_token(&self) -> Option<String> {
        self.0.clone()
    }
}

pub struct FixedBuildRepository;

impl BuildRepository for FixedBuildRepository {
    fn by_date(&self, _date: NaiveDate) -> Option<BuildDescriptor> {
        Some(BuildDescriptor {
            build: DATE_BUILD,
            date: None,
        })
    }

    fn by_product_version(&self) -> Option<BuildDescriptor> {
        Some(BuildDescriptor {
            build: PRODUCT_BUILD,
            date: None,
        })
    }
}

#[derive(Default)]
pub struct RecordingDeckRepository {
    saved: Mutex<Vec<DeckRecord>>,
    fail: AtomicBool,
}

impl RecordingDeckRepository {
    pub fn saved(&self) -> Vec<DeckRecord> {
        self.saved.lock().unwrap().clone()
    }

    pub fn fail_saves(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl DeckRepository for RecordingDeckRepository {
    async fn update(&self, deck: &DeckRecord) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("disk full");
        }
        self.saved.lock().unwrap().push(deck.clone());
        Ok(())
    }
}

pub struct Fixture {
    pub use_case: UploadLogUseCase<
        RecordingUploadRepository,
        FixedSettingsRepository,
        RecordingDeckRepository,
    >,
    pub decks: Arc<RecordingDeckRepository>,
    pub deduplicator: Arc<UploadDeduplicator>,
}

impl Fixture {
    pub fn new(upload_repository: Arc<RecordingUploadRepository>, token: Option<&str>) -> Self {
        let decks = Arc::new(RecordingDeckRepository::default());
        let deduplicator = Arc::new(UploadDeduplicator::new());
        let use_case = UploadLogUseCase::new(
            upload_repository,
            Arc::new(FixedSettingsRepository(token.map(str::to_string))),
            decks.clone(),
            MetadataBuilder::new(Arc::new(FixedBuildRepository)),
            deduplicator.clone(),
        );

        Self {
            use_case,
            decks,
            deduplicator,
        }
    }
}
