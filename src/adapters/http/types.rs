use serde::{Deserialize, Serialize};

use crate::domain::{Book, BookPage, Library, UserEmail};

/// 書籍一覧レスポンス
///
/// エラー時のボディも同じURLで返るため`results`は省略可能として受ける。
#[derive(Debug, Deserialize)]
pub struct BooksResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<Book>>,
}

impl BooksResponse {
    /// 結果を含む場合のみページに変換する
    pub fn into_page(self) -> Option<BookPage> {
        let results = self.results?;
        Some(BookPage {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results,
        })
    }
}

/// 図書館一覧レスポンス（ページ形式）
#[derive(Debug, Deserialize)]
pub struct LibrariesResponse {
    #[serde(default)]
    pub results: Vec<Library>,
}

/// POST /copies/{id}/borrow のボディ
#[derive(Debug, Serialize)]
pub struct BorrowRequest<'a> {
    pub user: &'a UserEmail,
}
