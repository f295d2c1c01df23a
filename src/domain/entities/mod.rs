//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **LogLine / RawLogBundle**: セッションログの行とアップロード対象の束
//! - **GameContext / StatisticContext**: 試合・戦績の付随情報
//! - **UploadMetadata**: アップロード時に送信するメタデータ
//! - **UploaderItem**: 進行中アップロードの識別子（バリューオブジェクト）
//! - **UploadResult / UploadError**: アップロードの最終結果

pub mod game_context;
pub mod log_line;
pub mod upload_metadata;
pub mod upload_result;
pub mod uploader_item;
