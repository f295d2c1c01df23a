//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod json_build_repository;
pub mod json_deck_repository;
pub mod json_settings_repository;
pub mod zip_archive_repository;
