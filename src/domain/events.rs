use chrono::{DateTime, Utc};

use super::{BookId, CopyId, UserEmail};

/// イベント：書籍が貸出された
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookBorrowed {
    pub book_id: BookId,
    pub copy_id: CopyId,
    pub borrower: UserEmail,
}

/// イベント：書籍が返却された
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookReturned {
    pub book_id: BookId,
    pub copy_id: CopyId,
}

/// イベント：ウェイトリストに登録した
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistJoined {
    pub book_id: BookId,
    pub added_at: DateTime<Utc>,
}

/// イベント：ウェイトリストから外れた
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistLeft {
    pub book_id: BookId,
}

/// 貸出操作の成功を表すイベント統合型
///
/// 成功トーストの文言はここから作る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LendingEvent {
    BookBorrowed(BookBorrowed),
    BookReturned(BookReturned),
    WaitlistJoined(WaitlistJoined),
    WaitlistLeft(WaitlistLeft),
}

impl LendingEvent {
    /// 利用者向けメッセージ
    pub fn message(&self) -> String {
        match self {
            LendingEvent::BookBorrowed(e) => format!("Book has been loaned to {}.", e.borrower),
            LendingEvent::BookReturned(_) => "Book has returned to library.".to_string(),
            LendingEvent::WaitlistJoined(_) => "You have joined the waitlist.".to_string(),
            LendingEvent::WaitlistLeft(_) => "You have left the waitlist.".to_string(),
        }
    }
}
