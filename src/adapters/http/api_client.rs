use crate::domain::{
    BookCopy, BookId, BookPage, CopyId, Library, LibrarySlug, UserEmail, WaitlistCheck,
};
use crate::ports::lending_api::{ApiError, LendingApi, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::form_urlencoded;

use super::types::{BooksResponse, BorrowRequest, LibrariesResponse};

/// 書籍一覧のパスを組み立てる
///
/// 検索語はタイトルと著者の両方に使う。
pub fn books_path(slug: &LibrarySlug, page: u32, search_term: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("page", &page.to_string())
        .append_pair("book_title", search_term)
        .append_pair("book_author", search_term)
        .finish();
    format!("/libraries/{}/books/?{}", slug, query)
}

/// リクエストボディをJSONに変換する
fn encode_body<T: Serialize>(body: &T) -> Result<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
}

/// reqwestによるLendingApiの実装
///
/// 1リクエスト1回のみ。リトライやタイムアウトの指定はしない。
pub struct HttpLendingApi {
    client: Client,
    base_url: String,
}

impl HttpLendingApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// リクエストを送り、2xx以外をエラーに変換する
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "sending request");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "request could not be sent");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%method, %url, status = status.as_u16(), "request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    /// JSONを返すエンドポイントを呼ぶ
    pub async fn fetch<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T> {
        let response = self.send(method, path, None).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl LendingApi for HttpLendingApi {
    async fn get_libraries(&self) -> Result<Vec<Library>> {
        let response: LibrariesResponse = self.fetch(Method::GET, "/libraries").await?;
        Ok(response.results)
    }

    async fn get_books_by_page(
        &self,
        slug: &LibrarySlug,
        page: u32,
        search_term: &str,
    ) -> Result<BookPage> {
        let path = books_path(slug, page, search_term);
        let response: BooksResponse = self.fetch(Method::GET, &path).await?;
        response.into_page().ok_or(ApiError::EmptyResult)
    }

    async fn get_copy(&self, copy_id: CopyId) -> Result<BookCopy> {
        self.fetch(Method::GET, &format!("/copies/{}", copy_id)).await
    }

    async fn borrow_copy(&self, copy_id: CopyId, user: &UserEmail) -> Result<()> {
        let body = encode_body(&BorrowRequest { user })?;
        self.send(
            Method::POST,
            &format!("/copies/{}/borrow", copy_id),
            Some(body),
        )
        .await?;
        Ok(())
    }

    async fn return_copy(&self, copy_id: CopyId) -> Result<()> {
        self.send(Method::POST, &format!("/copies/{}/return", copy_id), None)
            .await?;
        Ok(())
    }

    async fn check_waitlist(&self, book_id: BookId) -> Result<WaitlistCheck> {
        self.fetch(Method::GET, &format!("/books/{}/waitlist", book_id))
            .await
    }

    async fn join_waitlist(&self, book_id: BookId) -> Result<()> {
        self.send(Method::POST, &format!("/books/{}/waitlist", book_id), None)
            .await?;
        Ok(())
    }

    async fn leave_waitlist(&self, book_id: BookId) -> Result<()> {
        self.send(Method::DELETE, &format!("/books/{}/waitlist", book_id), None)
            .await?;
        Ok(())
    }
}
