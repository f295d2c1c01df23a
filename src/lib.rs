//! # Replaysync
//!
//! ゲームのセッションログをリプレイサービス（HSReplay形式）にアップロードするツール
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: ログ検証・開始日時解決・重複防止・メタデータ構築（外部依存なし）
//! - **Application層**: アップロードのビジネスフロー（ユースケース）
//! - **Adapter層**: 外部システムとの統合（HTTP, zip, ファイルシステム）
//! - **Driver層**: CLI、ロガー、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
