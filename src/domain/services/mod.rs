//! # Domain Services
//!
//! エンティティ単体に属さないビジネスルール
//!
//! - **LogValidator**: ログ行の構造チェック
//! - **GameStartResolver**: 試合開始日時の解決
//! - **UploadDeduplicator**: 進行中アップロードの重複排除
//! - **MetadataBuilder**: アップロードメタデータの構築

pub mod game_start_resolver;
pub mod log_validator;
pub mod metadata_builder;
pub mod upload_deduplicator;
