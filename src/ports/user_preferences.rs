use crate::domain::LibrarySlug;

/// 利用者設定ポート
pub trait UserPreferences: Send + Sync {
    /// 最後に閲覧した図書館を利用者の地域として記録する
    fn set_region(&self, slug: &LibrarySlug);
}
