use crate::domain::{self, *};
use crate::ports::*;
use std::sync::Arc;

use super::errors::{LendingError, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞いは持たず、各ユースケース関数に引数として渡す。
///
/// `waitlist_enabled`はプロセス全体の機能トグル。
/// 呼び出し時点の値で判定するため、途中で切り替えても実行中の貸出には影響しない。
#[derive(Clone)]
pub struct LendingDependencies {
    pub api: Arc<dyn LendingApi>,
    pub notifier: Arc<dyn NotificationService>,
    pub waitlist_enabled: bool,
}

/// 貸出の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowOutcome {
    /// 貸出成功。更新後の書籍を返す
    Borrowed { book: Book, event: BookBorrowed },
    /// 他の利用者が待っているため確認が必要（APIは呼んでいない）
    ConfirmationRequired { waiting_users: Vec<UserEmail> },
    /// 貸出可能な蔵書がない（APIは呼んでいない）
    NoAvailableCopy,
}

/// 返却の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// 返却成功。更新後の書籍を返す
    Returned { book: Book, event: BookReturned },
    /// 利用者が借りている蔵書がない（APIは呼んでいない）
    NotBorrowedByUser,
}

/// 失敗をログとトーストで利用者に伝える
async fn report(deps: &LendingDependencies, err: LendingError) -> LendingError {
    tracing::warn!(error = ?err, "lending request failed");
    deps.notifier.error(&err.to_string()).await;
    err
}

async fn announce(deps: &LendingDependencies, event: LendingEvent) {
    tracing::info!(?event, "lending request succeeded");
    deps.notifier.success(&event.message()).await;
}

/// 図書館一覧を取得する
pub async fn list_libraries(deps: &LendingDependencies) -> Result<Vec<Library>> {
    match deps.api.get_libraries().await {
        Ok(libraries) => Ok(libraries),
        Err(e) => Err(report(deps, LendingError::from_request_failure(e)).await),
    }
}

/// 貸出前にウェイトリストを確認する
///
/// # 戻り値
/// - `Proceed`: 誰も待っていない、または自分が先頭
/// - `ConfirmationRequired`: 他の利用者が待っている
pub async fn check_waitlist_gate(
    deps: &LendingDependencies,
    book: &Book,
) -> Result<WaitlistDecision> {
    match deps.api.check_waitlist(book.id).await {
        Ok(check) => Ok(domain::decide(check)),
        Err(e) => Err(report(deps, LendingError::from_request_failure(e)).await),
    }
}

/// 書籍を借りる
///
/// ビジネスルール：
/// - 貸出可能な蔵書がなければ何もしない（APIも呼ばない）
/// - ウェイトリスト機能が有効なら先にウェイトリストを確認する
/// - 他の利用者が待っていれば貸出を保留し、確認を求める
///
/// 入力の書籍は変更しない。失敗時は呼び出し側の書籍がそのまま正しい状態になる。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `book` - 対象の書籍
/// * `user` - 現在の利用者
pub async fn borrow_book(
    deps: &LendingDependencies,
    book: &Book,
    user: &User,
) -> Result<BorrowOutcome> {
    // 1. 貸出可能な蔵書の確認
    if domain::find_available_copy(book).is_none() {
        tracing::debug!(book_id = %book.id, "no available copy, borrow skipped");
        return Ok(BorrowOutcome::NoAvailableCopy);
    }

    // 2. ウェイトリストの確認（機能が無効なら行わない）
    if deps.waitlist_enabled {
        if let WaitlistDecision::ConfirmationRequired { waiting_users } =
            check_waitlist_gate(deps, book).await?
        {
            tracing::info!(
                book_id = %book.id,
                waiting = waiting_users.len(),
                "others are waiting, confirmation required"
            );
            return Ok(BorrowOutcome::ConfirmationRequired { waiting_users });
        }
    }

    // 3. 貸出
    confirm_borrow(deps, book, user).await
}

/// ウェイトリストを確認せずに書籍を借りる
///
/// 確認ダイアログで利用者が続行を選んだ後に呼ばれる。
/// 最初の貸出可能な蔵書を借り、その蔵書の借り手だけを更新した書籍を返す。
pub async fn confirm_borrow(
    deps: &LendingDependencies,
    book: &Book,
    user: &User,
) -> Result<BorrowOutcome> {
    let Some(copy) = domain::find_available_copy(book) else {
        return Ok(BorrowOutcome::NoAvailableCopy);
    };
    let copy_id = copy.id;

    if let Err(e) = deps.api.borrow_copy(copy_id, &user.email).await {
        return Err(report(deps, LendingError::from_borrow_failure(e)).await);
    }

    let updated = domain::borrow_copy(book, copy_id, user);
    let event = BookBorrowed {
        book_id: book.id,
        copy_id,
        borrower: user.email.clone(),
    };
    announce(deps, LendingEvent::BookBorrowed(event.clone())).await;

    Ok(BorrowOutcome::Borrowed {
        book: updated,
        event,
    })
}

/// 書籍を返却する
///
/// ビジネスルール：
/// - 利用者本人が借りている蔵書のみ返却できる
/// - 該当する蔵書がなければ何もしない（APIも呼ばない）
pub async fn return_book(
    deps: &LendingDependencies,
    book: &Book,
    user: &User,
) -> Result<ReturnOutcome> {
    let Some(copy) = domain::find_copy_borrowed_by(book, &user.email) else {
        tracing::debug!(book_id = %book.id, "no copy borrowed by user, return skipped");
        return Ok(ReturnOutcome::NotBorrowedByUser);
    };
    let copy_id = copy.id;

    if let Err(e) = deps.api.return_copy(copy_id).await {
        return Err(report(deps, LendingError::from_return_failure(e)).await);
    }

    let updated = domain::return_copy(book, copy_id);
    let event = BookReturned {
        book_id: book.id,
        copy_id,
    };
    announce(deps, LendingEvent::BookReturned(event.clone())).await;

    Ok(ReturnOutcome::Returned {
        book: updated,
        event,
    })
}

/// ウェイトリストに登録する
pub async fn join_waitlist(deps: &LendingDependencies, book: &Book) -> Result<Book> {
    if let Err(e) = deps.api.join_waitlist(book.id).await {
        return Err(report(deps, LendingError::from_request_failure(e)).await);
    }

    let added_at = chrono::Utc::now();
    announce(
        deps,
        LendingEvent::WaitlistJoined(WaitlistJoined {
            book_id: book.id,
            added_at,
        }),
    )
    .await;

    Ok(domain::join_waitlist(book, added_at))
}

/// ウェイトリストから外れる
pub async fn leave_waitlist(deps: &LendingDependencies, book: &Book) -> Result<Book> {
    if let Err(e) = deps.api.leave_waitlist(book.id).await {
        return Err(report(deps, LendingError::from_request_failure(e)).await);
    }

    announce(
        deps,
        LendingEvent::WaitlistLeft(WaitlistLeft { book_id: book.id }),
    )
    .await;

    Ok(domain::leave_waitlist(book))
}

/// 蔵書をサーバーから取り直し、書籍の該当蔵書を置き換える
///
/// 貸出・返却の後に、直近の貸出記録（借り手と日時）を表示に反映するために使う。
/// 貸出・返却そのものは成功しているため、失敗してもトーストは出さずログに残すだけ。
pub async fn refresh_copy(
    deps: &LendingDependencies,
    book: &Book,
    copy_id: CopyId,
) -> Result<Book> {
    match deps.api.get_copy(copy_id).await {
        Ok(copy) => Ok(domain::replace_copy(book, copy)),
        Err(e) => {
            let err = LendingError::from_request_failure(e);
            tracing::warn!(%copy_id, error = ?err, "failed to refresh copy");
            Err(err)
        }
    }
}
