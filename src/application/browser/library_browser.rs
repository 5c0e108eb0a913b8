use crate::domain::{Book, LibrarySlug};
use crate::ports::{LendingApi, Location, UserPreferences};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::query_string::{search_term_from_query, with_search_term};

/// 図書館ブラウザの依存関係
#[derive(Clone)]
pub struct BrowserDependencies {
    pub api: Arc<dyn LendingApi>,
    pub location: Arc<dyn Location>,
    pub preferences: Arc<dyn UserPreferences>,
}

/// 図書館ブラウザの表示状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryState {
    pub slug: LibrarySlug,
    pub items: Vec<Book>,
    /// 次に取得するページ（1始まり）
    pub page: u32,
    pub has_more: bool,
    pub search_term: String,
    pub is_loading: bool,
    /// 取得失敗。図書館か検索語が変わるまで残る
    pub has_error: bool,
}

impl LibraryState {
    /// 初期状態
    ///
    /// 最初のページを無限スクロールに要求させるため`has_more`はtrueで始める。
    fn initial(slug: LibrarySlug, search_term: String) -> Self {
        Self {
            slug,
            items: Vec::new(),
            page: 1,
            has_more: true,
            search_term,
            is_loading: false,
            has_error: false,
        }
    }
}

/// `load`の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// ページを取得して追加した
    Loaded { added: usize },
    /// 取得中、またはエラー状態のため何もしなかった
    Skipped,
    /// 取得に失敗した
    Failed,
}

/// 図書館の書籍一覧をページ単位で取得して積み上げる
///
/// 状態は`Mutex`で保護するが、await中はロックを保持しない。
/// 取得中フラグにより、同時に呼ばれた`load`は1回のリクエストにまとめられる。
///
/// 実行中のリクエストは取り消さない。図書館や検索語の変更後に古いレスポンスが
/// 届いた場合も、その時点の状態に適用される。
pub struct LibraryBrowser {
    deps: BrowserDependencies,
    state: Mutex<LibraryState>,
}

impl LibraryBrowser {
    /// 図書館ブラウザを作る
    ///
    /// 検索語はURLの`q`パラメータから復元する。
    pub fn new(deps: BrowserDependencies, slug: LibrarySlug) -> Self {
        let search_term = search_term_from_query(&deps.location.search());
        Self {
            deps,
            state: Mutex::new(LibraryState::initial(slug, search_term)),
        }
    }

    fn state(&self) -> MutexGuard<'_, LibraryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 現在の状態の写し
    pub fn snapshot(&self) -> LibraryState {
        self.state().clone()
    }

    /// 次のページを取得する
    ///
    /// - 取得中、またはエラー状態なら何もしない
    /// - 成功：結果を追加、ページを進め、`next`の有無で`has_more`を決める
    /// - 失敗：`has_error`を立てる。取得済みの書籍は残す
    pub async fn load(&self) -> LoadOutcome {
        let (slug, page, search_term) = {
            let mut state = self.state();
            if state.is_loading || state.has_error {
                return LoadOutcome::Skipped;
            }
            state.is_loading = true;
            state.has_more = false;
            (state.slug.clone(), state.page, state.search_term.clone())
        };

        tracing::debug!(%slug, page, search_term = %search_term, "loading books");

        match self
            .deps
            .api
            .get_books_by_page(&slug, page, &search_term)
            .await
        {
            Ok(books) => {
                let added = books.results.len();
                let current = {
                    let mut state = self.state();
                    state.has_more = books.has_next();
                    state.items.extend(books.results);
                    state.page += 1;
                    state.is_loading = false;
                    state.slug.clone()
                };

                // 地域は応答時点で表示中の図書館にする
                self.deps.preferences.set_region(&current);

                LoadOutcome::Loaded { added }
            }
            Err(e) => {
                tracing::warn!(%slug, page, error = %e, "failed to load books");

                let mut state = self.state();
                state.has_error = true;
                state.is_loading = false;

                LoadOutcome::Failed
            }
        }
    }

    /// 検索語を変更する
    ///
    /// 一覧をリセットして1ページ目から取得し直し、検索語をURLに反映する。
    pub async fn set_search_term(&self, term: &str) -> LoadOutcome {
        {
            let mut state = self.state();
            state.search_term = term.to_string();
            state.items.clear();
            state.page = 1;
            state.has_more = false;
            state.is_loading = false;
            state.has_error = false;
        }

        let outcome = self.load().await;

        let search = with_search_term(&self.deps.location.search(), term);
        self.deps.location.replace(&search);

        outcome
    }

    /// 表示中の図書館を切り替える
    ///
    /// 同じ図書館なら何もしない。異なれば状態をすべて初期化して取得し直す。
    pub async fn change_library(&self, slug: LibrarySlug) -> LoadOutcome {
        {
            let mut state = self.state();
            if state.slug == slug {
                return LoadOutcome::Skipped;
            }
            tracing::info!(from = %state.slug, to = %slug, "library changed");
            *state = LibraryState::initial(slug, String::new());
        }

        self.load().await
    }
}
