//! Replay Service Adapter Modules
//!
//! リプレイサービスとの通信のためのアダプターモジュール

pub mod client;
pub mod compression;
pub mod models;
pub mod protocol_client;
