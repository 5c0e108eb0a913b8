use crate::domain::{
    BookCopy, BookId, BookPage, CopyId, Library, LibrarySlug, UserEmail, WaitlistCheck,
};
use async_trait::async_trait;
use thiserror::Error;

/// バックエンドAPI呼び出しのエラー
///
/// リトライはしない。呼び出しは常に1回だけ行われる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 2xx以外のステータスが返った
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },

    /// レスポンスに期待した結果が含まれていない
    #[error("response did not contain any results")]
    EmptyResult,

    /// 接続失敗などの通信エラー
    #[error("network error: {0}")]
    Network(String),

    /// レスポンスのJSONを解釈できない
    #[error("could not decode response: {0}")]
    Decode(String),

    /// リクエストボディをJSONにできない
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// 貸出バックエンドAPIポート
///
/// HTTPの詳細（パス、メソッド、ボディ）はアダプター側に閉じ込める。
#[async_trait]
pub trait LendingApi: Send + Sync {
    /// GET /libraries
    async fn get_libraries(&self) -> Result<Vec<Library>>;

    /// GET /libraries/{slug}/books/ - 検索語でタイトルと著者を絞り込む
    async fn get_books_by_page(
        &self,
        slug: &LibrarySlug,
        page: u32,
        search_term: &str,
    ) -> Result<BookPage>;

    /// GET /copies/{id} - 直近の貸出記録を含む
    async fn get_copy(&self, copy_id: CopyId) -> Result<BookCopy>;

    /// POST /copies/{id}/borrow
    async fn borrow_copy(&self, copy_id: CopyId, user: &UserEmail) -> Result<()>;

    /// POST /copies/{id}/return
    async fn return_copy(&self, copy_id: CopyId) -> Result<()>;

    async fn check_waitlist(&self, book_id: BookId) -> Result<WaitlistCheck>;

    async fn join_waitlist(&self, book_id: BookId) -> Result<()>;

    async fn leave_waitlist(&self, book_id: BookId) -> Result<()>;
}

