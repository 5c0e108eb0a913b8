use crate::domain::{
    BookCopy, BookId, BookPage, CopyId, Library, LibrarySlug, UserEmail, WaitlistCheck,
    WaitlistStatus,
};
use crate::ports::lending_api::{ApiError, LendingApi as LendingApiTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// A request received by the mock API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    GetLibraries,
    GetBooksByPage {
        slug: LibrarySlug,
        page: u32,
        search_term: String,
    },
    GetCopy(CopyId),
    BorrowCopy(CopyId, UserEmail),
    ReturnCopy(CopyId),
    CheckWaitlist(BookId),
    JoinWaitlist(BookId),
    LeaveWaitlist(BookId),
}

/// In-memory mock of the lending backend
///
/// Records every call and answers with configurable responses.
/// Every operation succeeds until a failure is registered for it.
pub struct LendingApi {
    calls: Mutex<Vec<ApiCall>>,
    libraries: Mutex<Vec<Library>>,
    books_response: Mutex<Result<BookPage>>,
    copies: Mutex<HashMap<CopyId, BookCopy>>,
    waitlist: Mutex<Result<WaitlistCheck>>,
    borrow_failure: Mutex<Option<ApiError>>,
    return_failure: Mutex<Option<ApiError>>,
    join_failure: Mutex<Option<ApiError>>,
    leave_failure: Mutex<Option<ApiError>>,
    page_gate: Mutex<Option<Arc<Notify>>>,
}

impl LendingApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            libraries: Mutex::new(Vec::new()),
            books_response: Mutex::new(Ok(BookPage {
                count: 0,
                next: None,
                previous: None,
                results: Vec::new(),
            })),
            copies: Mutex::new(HashMap::new()),
            waitlist: Mutex::new(Ok(WaitlistCheck {
                status: WaitlistStatus::NoWaitlist,
                users: Vec::new(),
            })),
            borrow_failure: Mutex::new(None),
            return_failure: Mutex::new(None),
            join_failure: Mutex::new(None),
            leave_failure: Mutex::new(None),
            page_gate: Mutex::new(None),
        }
    }

    pub fn set_libraries(&self, libraries: Vec<Library>) {
        *self.libraries.lock().unwrap() = libraries;
    }

    /// Response returned for every book page request
    pub fn set_books_response(&self, response: Result<BookPage>) {
        *self.books_response.lock().unwrap() = response;
    }

    pub fn add_copy(&self, copy: BookCopy) {
        self.copies.lock().unwrap().insert(copy.id, copy);
    }

    pub fn set_waitlist(&self, check: WaitlistCheck) {
        *self.waitlist.lock().unwrap() = Ok(check);
    }

    pub fn fail_waitlist_with(&self, err: ApiError) {
        *self.waitlist.lock().unwrap() = Err(err);
    }

    pub fn fail_borrow_with(&self, err: ApiError) {
        *self.borrow_failure.lock().unwrap() = Some(err);
    }

    pub fn fail_return_with(&self, err: ApiError) {
        *self.return_failure.lock().unwrap() = Some(err);
    }

    pub fn fail_join_with(&self, err: ApiError) {
        *self.join_failure.lock().unwrap() = Some(err);
    }

    pub fn fail_leave_with(&self, err: ApiError) {
        *self.leave_failure.lock().unwrap() = Some(err);
    }

    /// Book page requests wait until `release_pages` is called
    pub fn hold_pages(&self) {
        *self.page_gate.lock().unwrap() = Some(Arc::new(Notify::new()));
    }

    /// Lets one held book page request complete
    pub fn release_pages(&self) {
        if let Some(gate) = self.page_gate.lock().unwrap().as_ref() {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn borrow_calls(&self) -> Vec<CopyId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::BorrowCopy(id, _) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn return_calls(&self) -> Vec<CopyId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::ReturnCopy(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// (page, search term) of each book page request
    pub fn page_requests(&self) -> Vec<(LibrarySlug, u32, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::GetBooksByPage {
                    slug,
                    page,
                    search_term,
                } => Some((slug, page, search_term)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn failure(slot: &Mutex<Option<ApiError>>) -> Result<()> {
        match slot.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for LendingApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LendingApiTrait for LendingApi {
    async fn get_libraries(&self) -> Result<Vec<Library>> {
        self.record(ApiCall::GetLibraries);
        Ok(self.libraries.lock().unwrap().clone())
    }

    async fn get_books_by_page(
        &self,
        slug: &LibrarySlug,
        page: u32,
        search_term: &str,
    ) -> Result<BookPage> {
        self.record(ApiCall::GetBooksByPage {
            slug: slug.clone(),
            page,
            search_term: search_term.to_string(),
        });

        let gate = self.page_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.books_response.lock().unwrap().clone()
    }

    async fn get_copy(&self, copy_id: CopyId) -> Result<BookCopy> {
        self.record(ApiCall::GetCopy(copy_id));
        self.copies
            .lock()
            .unwrap()
            .get(&copy_id)
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                body: String::new(),
            })
    }

    async fn borrow_copy(&self, copy_id: CopyId, user: &UserEmail) -> Result<()> {
        self.record(ApiCall::BorrowCopy(copy_id, user.clone()));
        Self::failure(&self.borrow_failure)
    }

    async fn return_copy(&self, copy_id: CopyId) -> Result<()> {
        self.record(ApiCall::ReturnCopy(copy_id));
        Self::failure(&self.return_failure)
    }

    async fn check_waitlist(&self, book_id: BookId) -> Result<WaitlistCheck> {
        self.record(ApiCall::CheckWaitlist(book_id));
        self.waitlist.lock().unwrap().clone()
    }

    async fn join_waitlist(&self, book_id: BookId) -> Result<()> {
        self.record(ApiCall::JoinWaitlist(book_id));
        Self::failure(&self.join_failure)
    }

    async fn leave_waitlist(&self, book_id: BookId) -> Result<()> {
        self.record(ApiCall::LeaveWaitlist(book_id));
        Self::failure(&self.leave_failure)
    }
}
