//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - フレームワークに依存しない
//! - HTTPやアーカイブ形式について何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（LogLine, UploadMetadataなど）
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（検証、開始日時の解決、重複排除、メタデータ構築）

pub mod entities;
pub mod repositories;
pub mod services;
