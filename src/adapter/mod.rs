//! Adapter Layer
//!
//! 外部システム（リプレイサービス, ファイルシステム）との統合

pub mod config;
pub mod hsreplay;
pub mod repositories;
