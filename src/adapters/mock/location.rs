use crate::ports::location::Location as LocationTrait;
use std::sync::Mutex;

/// インメモリのURL履歴
///
/// `replace`の呼び出しを記録し、現在のクエリ文字列も書き換える。
pub struct Location {
    search: Mutex<String>,
    replaced: Mutex<Vec<String>>,
}

impl Location {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: Mutex::new(search.into()),
            replaced: Mutex::new(Vec::new()),
        }
    }

    pub fn replaced(&self) -> Vec<String> {
        self.replaced.lock().unwrap().clone()
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("")
    }
}

impl LocationTrait for Location {
    fn search(&self) -> String {
        self.search.lock().unwrap().clone()
    }

    fn replace(&self, search: &str) {
        *self.search.lock().unwrap() = search.to_string();
        self.replaced.lock().unwrap().push(search.to_string());
    }
}
