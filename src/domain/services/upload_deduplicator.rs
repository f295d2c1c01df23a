//! # Upload Deduplicator
//!
//! 同一内容のアップロードが同時に走らないようにするための、進行中ハッシュの登録簿

use log::debug;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::uploader_item::UploaderItem;

/// 進行中アップロードの登録簿
///
/// 複数の呼び出し元から同時に使われるため、内部の集合はロックで保護する。
/// 読み書きは `try_begin` / `end`（と `InProgressGuard`）を通してのみ行う。
#[derive(Debug, Default)]
pub struct UploadDeduplicator {
    in_progress: Mutex<HashSet<UploaderItem>>,
}

impl UploadDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// アップロード開始を登録する
    ///
    /// # Returns
    ///
    /// 初回登録なら `true`。既に進行中なら `false` を返し、何も追加しない。
    pub fn try_begin(&self, item: &UploaderItem) -> bool {
        let inserted = self.in_progress.lock().insert(item.clone());
        debug!("try_begin {} -> {}", item, inserted);
        inserted
    }

    /// アップロード終了を登録する（成功・失敗を問わず呼ぶ）
    pub fn end(&self, item: &UploaderItem) {
        let removed = self.in_progress.lock().remove(item);
        debug!("end {} (registered: {})", item, removed);
    }

    /// 登録し、スコープを抜けたときに自動で `end` するガードを返す
    ///
    /// 既に進行中の場合は `None`
    pub fn begin(self: &Arc<Self>, item: UploaderItem) -> Option<InProgressGuard> {
        if !self.try_begin(&item) {
            return None;
        }
        Some(InProgressGuard {
            registry: Arc::clone(self),
            item,
        })
    }

    pub fn is_in_progress(&self, item: &UploaderItem) -> bool {
        self.in_progress.lock().contains(item)
    }

    /// 進行中のアップロード数
    pub fn len(&self) -> usize {
        self.in_progress.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 登録中のアップロード
///
/// ドロップ時にちょうど1回だけ登録を解除する
#[derive(Debug)]
pub struct InProgressGuard {
    registry: Arc<UploadDeduplicator>,
    item: UploaderItem,
}

impl InProgressGuard {
    pub fn item(&self) -> &UploaderItem {
        &self.item
    }
}

impl Drop for InProgressGuard {
    fn drop(&mut self) {
        self.registry.end(&self.item);
    }
}
