use crate::application::lending::{
    self, BorrowOutcome, LendingDependencies, LendingError, ReturnOutcome,
};
use crate::domain::{self, Book, BookAction, CopyId, NO_IMAGE_URL, User, UserEmail};

/// 確認ダイアログの問いかけ
pub const CONFIRM_BORROW_PROMPT: &str = "Do you wish to proceed and borrow this book?";

/// 他の利用者が待っている書籍を借りる前の確認ダイアログ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistDialog {
    pub waiting_users: Vec<UserEmail>,
}

impl WaitlistDialog {
    pub fn message(&self) -> String {
        domain::waiting_users_message(&self.waiting_users)
    }

    pub fn prompt(&self) -> &'static str {
        CONFIRM_BORROW_PROMPT
    }
}

/// 書籍カード - 1冊の書籍の表示状態を持つ
///
/// 書籍の状態はこのカードだけが持ち、ユースケースが返した新しい書籍で置き換える。
/// 他のカードの状態には触れない。
pub struct BookCard {
    deps: LendingDependencies,
    user: User,
    book: Book,
    dialog: Option<WaitlistDialog>,
}

impl BookCard {
    pub fn new(deps: LendingDependencies, user: User, book: Book) -> Self {
        Self {
            deps,
            user,
            book,
            dialog: None,
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn dialog(&self) -> Option<&WaitlistDialog> {
        self.dialog.as_ref()
    }

    /// 表示するボタン
    pub fn action(&self) -> BookAction {
        domain::available_action(&self.book, &self.user.email, self.deps.waitlist_enabled)
    }

    pub fn cover_url(&self) -> &str {
        self.book
            .image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(NO_IMAGE_URL)
    }

    /// ウェイトリスト登録中の表示（例: `On your waitlist since Sep 1, 2019`）
    pub fn waitlist_indicator(&self) -> Option<String> {
        if !self.deps.waitlist_enabled || !self.book.is_on_user_waitlist {
            return None;
        }

        Some(match self.book.waitlist_added_date {
            Some(date) => format!("On your waitlist since {}", date.format("%b %-d, %Y")),
            None => "On your waitlist".to_string(),
        })
    }

    /// ボタンが押された
    ///
    /// 確認ダイアログ表示中は何もしない。
    /// 失敗時の通知はユースケース側で済んでいるため、エラーは呼び出し側の判断用に返すだけ。
    pub async fn click_action(&mut self) -> Result<(), LendingError> {
        if self.dialog.is_some() {
            return Ok(());
        }

        match self.action() {
            BookAction::Borrow => {
                let outcome = lending::borrow_book(&self.deps, &self.book, &self.user).await?;
                self.apply_borrow(outcome).await;
            }
            BookAction::Return => {
                let outcome = lending::return_book(&self.deps, &self.book, &self.user).await?;
                if let ReturnOutcome::Returned { book, event } = outcome {
                    self.book = book;
                    self.refresh(event.copy_id).await;
                }
            }
            BookAction::JoinWaitlist => {
                self.book = lending::join_waitlist(&self.deps, &self.book).await?;
            }
            BookAction::LeaveWaitlist => {
                self.book = lending::leave_waitlist(&self.deps, &self.book).await?;
            }
            BookAction::None => {}
        }

        Ok(())
    }

    /// 確認ダイアログで「Confirm and Borrow」が押された
    pub async fn confirm(&mut self) -> Result<(), LendingError> {
        if self.dialog.take().is_none() {
            return Ok(());
        }

        let outcome = lending::confirm_borrow(&self.deps, &self.book, &self.user).await?;
        self.apply_borrow(outcome).await;
        Ok(())
    }

    /// 確認ダイアログで「Cancel」が押された
    pub fn cancel(&mut self) {
        self.dialog = None;
    }

    async fn apply_borrow(&mut self, outcome: BorrowOutcome) {
        match outcome {
            BorrowOutcome::Borrowed { book, event } => {
                self.book = book;
                self.refresh(event.copy_id).await;
            }
            BorrowOutcome::ConfirmationRequired { waiting_users } => {
                self.dialog = Some(WaitlistDialog { waiting_users });
            }
            BorrowOutcome::NoAvailableCopy => {}
        }
    }

    /// 貸出記録をサーバーの内容で更新する。失敗時は手元の書籍のまま
    async fn refresh(&mut self, copy_id: CopyId) {
        if let Ok(book) = lending::refresh_copy(&self.deps, &self.book, copy_id).await {
            self.book = book;
        }
    }
}
