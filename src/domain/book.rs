use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, CopyId, LibraryId, LibrarySlug, LoanId, UserEmail};

/// 表紙画像がない書籍に使う画像
pub const NO_IMAGE_URL: &str = "images/no-image.png";

/// 利用者
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: UserEmail,
    #[serde(default)]
    pub image_url: String,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: UserEmail::new(email),
            image_url: String::new(),
        }
    }
}

/// 直近の貸出記録
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastLoan {
    pub id: LoanId,
    pub email: UserEmail,
    pub loan_date: DateTime<Utc>,
}

/// 蔵書 - 書籍の1冊分の貸出単位
///
/// 不変条件：借り手は高々1人（`user`がNoneなら貸出可能）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCopy {
    pub id: CopyId,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub last_loan: Option<LastLoan>,
}

impl BookCopy {
    pub fn is_available(&self) -> bool {
        self.user.is_none()
    }

    /// 指定した利用者が現在借りているか
    pub fn is_borrowed_by(&self, email: &UserEmail) -> bool {
        self.user.as_ref().is_some_and(|u| &u.email == email)
    }
}

/// 書籍
///
/// バックエンドが所有し、クライアントはページ単位で取得した一時的な写しを持つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub copies: Vec<BookCopy>,
    #[serde(default)]
    pub is_on_user_waitlist: bool,
    #[serde(default)]
    pub waitlist_added_date: Option<DateTime<Utc>>,
}

/// 図書館
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub id: LibraryId,
    pub name: String,
    pub slug: LibrarySlug,
}

/// 書籍一覧の1ページ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPage {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<Book>,
}

impl BookPage {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// 書籍に対して現在の利用者が取れる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookAction {
    Borrow,
    Return,
    JoinWaitlist,
    LeaveWaitlist,
    None,
}

impl BookAction {
    /// ボタンの表示名。操作がない場合はNone
    pub fn label(&self) -> Option<&'static str> {
        match self {
            BookAction::Borrow => Some("Borrow"),
            BookAction::Return => Some("Return"),
            BookAction::JoinWaitlist => Some("Join the waitlist"),
            BookAction::LeaveWaitlist => Some("Leave the waitlist"),
            BookAction::None => None,
        }
    }
}

// ============================================================================
// 純粋関数
// ============================================================================

/// 貸出可能な蔵書が1冊以上あるか
pub fn is_available(book: &Book) -> bool {
    book.copies.iter().any(BookCopy::is_available)
}

/// 最初の貸出可能な蔵書
pub fn find_available_copy(book: &Book) -> Option<&BookCopy> {
    book.copies.iter().find(|c| c.is_available())
}

/// 利用者が借りている蔵書
pub fn find_copy_borrowed_by<'a>(book: &'a Book, email: &UserEmail) -> Option<&'a BookCopy> {
    book.copies.iter().find(|c| c.is_borrowed_by(email))
}

/// 純粋関数：蔵書を貸し出した後の書籍を返す
///
/// 指定した蔵書の借り手だけを書き換える。他の蔵書は変更しない。
/// 副作用なし。
pub fn borrow_copy(book: &Book, copy_id: CopyId, user: &User) -> Book {
    with_copy_user(book, copy_id, Some(user.clone()))
}

/// 純粋関数：蔵書を返却した後の書籍を返す
pub fn return_copy(book: &Book, copy_id: CopyId) -> Book {
    with_copy_user(book, copy_id, None)
}

fn with_copy_user(book: &Book, copy_id: CopyId, user: Option<User>) -> Book {
    let copies = book
        .copies
        .iter()
        .map(|c| {
            if c.id == copy_id {
                BookCopy {
                    user: user.clone(),
                    ..c.clone()
                }
            } else {
                c.clone()
            }
        })
        .collect();

    Book {
        copies,
        ..book.clone()
    }
}

/// 純粋関数：サーバーから取得した蔵書で置き換える
///
/// 該当する蔵書がない場合は元の書籍をそのまま返す。
pub fn replace_copy(book: &Book, copy: BookCopy) -> Book {
    let copies = book
        .copies
        .iter()
        .map(|c| if c.id == copy.id { copy.clone() } else { c.clone() })
        .collect();

    Book {
        copies,
        ..book.clone()
    }
}

/// 純粋関数：ウェイトリストに登録した後の書籍
pub fn join_waitlist(book: &Book, added_at: DateTime<Utc>) -> Book {
    Book {
        is_on_user_waitlist: true,
        waitlist_added_date: Some(added_at),
        ..book.clone()
    }
}

/// 純粋関数：ウェイトリストから外れた後の書籍
pub fn leave_waitlist(book: &Book) -> Book {
    Book {
        is_on_user_waitlist: false,
        waitlist_added_date: None,
        ..book.clone()
    }
}

/// 利用者が取れる操作を決める
///
/// 優先順位：
/// 1. 自分が借りている蔵書があれば返却
/// 2. 貸出可能な蔵書があれば貸出
/// 3. ウェイトリスト機能が有効で蔵書が存在すれば登録／解除
pub fn available_action(book: &Book, email: &UserEmail, waitlist_enabled: bool) -> BookAction {
    if find_copy_borrowed_by(book, email).is_some() {
        return BookAction::Return;
    }

    if is_available(book) {
        return BookAction::Borrow;
    }

    if waitlist_enabled && !book.copies.is_empty() {
        return if book.is_on_user_waitlist {
            BookAction::LeaveWaitlist
        } else {
            BookAction::JoinWaitlist
        };
    }

    BookAction::None
}
