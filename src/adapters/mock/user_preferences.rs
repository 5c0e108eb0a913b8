use crate::domain::LibrarySlug;
use crate::ports::user_preferences::UserPreferences as UserPreferencesTrait;
use std::sync::Mutex;

/// UserPreferencesのモック実装
///
/// 記録された地域を順に保持する。
pub struct UserPreferences {
    regions: Mutex<Vec<LibrarySlug>>,
}

impl UserPreferences {
    pub fn new() -> Self {
        Self {
            regions: Mutex::new(Vec::new()),
        }
    }

    pub fn regions(&self) -> Vec<LibrarySlug> {
        self.regions.lock().unwrap().clone()
    }
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self::new()
    }
}

impl UserPreferencesTrait for UserPreferences {
    fn set_region(&self, slug: &LibrarySlug) {
        self.regions.lock().unwrap().push(slug.clone());
    }
}
