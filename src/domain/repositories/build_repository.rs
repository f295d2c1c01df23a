//! # Build Repository Trait
//!
//! 日付や実行中の製品バージョンからクライアントのビルド番号を引く処理を抽象化

use chrono::{Local, NaiveDate};

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::upload_metadata::BuildDescriptor;

/// ビルドリポジトリ
///
/// メタデータ構築時のビルド番号解決に使用する。
/// いずれの検索も見つからなければ `None` を返し、エラーにはしない。
#[cfg_attr(test, automock)]
pub trait BuildRepository: Send + Sync {
    /// 指定日付の時点で配信されていたビルドを返す
    ///
    /// # Arguments
    ///
    /// * `date` - 試合が行われた日付
    fn by_date(&self, date: NaiveDate) -> Option<BuildDescriptor>;

    /// 現在インストールされている製品のバージョン情報からビルドを返す
    fn by_product_version(&self) -> Option<BuildDescriptor>;

    /// 今日の日付でビルドを返す
    fn by_current_date(&self) -> Option<BuildDescriptor> {
        self.by_date(Local::now().date_naive())
    }
}
