//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **UploadLogUseCase**: メモリ上のログ行のアップロード（検証・重複排除・送信）
//! - **UploadBundleUseCase**: アーカイブの展開を含む、任意のログバンドルのアップロード

pub mod upload_bundle;
pub mod upload_log;

#[cfg(test)]
pub(crate) mod test_support;
