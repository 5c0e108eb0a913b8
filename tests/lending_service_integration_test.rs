use library_lending_client::adapters::mock::{
    ApiCall, LendingApi as MockLendingApi, NotificationService as MockNotifier, Toast,
};
use library_lending_client::application::lending::*;
use library_lending_client::domain::{
    BookCopy, CopyId, LastLoan, Library, LibraryId, LibrarySlug, LoanId, UserEmail,
    WaitlistCheck, WaitlistStatus, waiting_users_message,
};
use library_lending_client::ports::ApiError;
use std::sync::Arc;

mod common;

use common::*;

// ============================================================================
// テスト用のヘルパー関数
// ============================================================================

fn setup(waitlist_enabled: bool) -> (LendingDependencies, Arc<MockLendingApi>, Arc<MockNotifier>) {
    let api = Arc::new(MockLendingApi::new());
    let notifier = Arc::new(MockNotifier::new());
    let deps = LendingDependencies {
        api: api.clone(),
        notifier: notifier.clone(),
        waitlist_enabled,
    };
    (deps, api, notifier)
}

fn status(code: u16) -> ApiError {
    ApiError::Status {
        status: code,
        body: String::new(),
    }
}

fn others_waiting(users: &[&str]) -> WaitlistCheck {
    WaitlistCheck {
        status: WaitlistStatus::OthersWaiting,
        users: users.iter().map(|u| UserEmail::new(*u)).collect(),
    }
}

// ============================================================================
// 貸出
// ============================================================================

#[tokio::test]
async fn test_borrow_book_with_available_copy() {
    // Arrange
    let (deps, api, notifier) = setup(false);
    let book = book_with_available_copies();

    // Act
    let outcome = borrow_book(&deps, &book, &current_user()).await.unwrap();

    // Assert
    let BorrowOutcome::Borrowed { book: updated, event } = outcome else {
        panic!("expected borrowed outcome");
    };
    assert_eq!(updated.copies[0].user, Some(current_user()));
    assert_eq!(event.copy_id, CopyId::new(1));
    assert_eq!(
        api.calls(),
        vec![ApiCall::BorrowCopy(CopyId::new(1), current_user().email)]
    );
    assert_eq!(
        notifier.toasts(),
        vec![Toast::Success(
            "Book has been loaned to currentuser@example.com.".to_string()
        )]
    );
}

#[tokio::test]
async fn test_borrow_changes_exactly_one_copy() {
    let (deps, api, _) = setup(false);
    let book = some_book(
        7,
        vec![
            copy(1, Some(some_user())),
            copy(2, None),
            copy(3, None),
        ],
    );

    let outcome = borrow_book(&deps, &book, &current_user()).await.unwrap();

    let BorrowOutcome::Borrowed { book: updated, .. } = outcome else {
        panic!("expected borrowed outcome");
    };
    assert_eq!(updated.copies[0], book.copies[0]);
    assert_eq!(updated.copies[1].user, Some(current_user()));
    assert_eq!(updated.copies[2], book.copies[2]);
    assert_eq!(api.borrow_calls(), vec![CopyId::new(2)]);
}

#[tokio::test]
async fn test_borrow_book_without_available_copies_is_noop() {
    let (deps, api, notifier) = setup(true);
    let book = book_with_no_available_copies();

    let outcome = borrow_book(&deps, &book, &current_user()).await.unwrap();

    assert_eq!(outcome, BorrowOutcome::NoAvailableCopy);
    assert!(api.calls().is_empty());
    assert!(notifier.toasts().is_empty());
}

#[tokio::test]
async fn test_borrow_conflict_reports_conflict_message() {
    let (deps, api, notifier) = setup(false);
    api.fail_borrow_with(status(409));
    let book = book_with_available_copies();

    let result = borrow_book(&deps, &book, &current_user()).await;

    assert_eq!(result, Err(LendingError::Conflict));
    assert_eq!(notifier.errors(), vec![LendingError::Conflict.to_string()]);
    // 入力の書籍は変更されない
    assert_eq!(book.copies[0].user, None);
}

#[tokio::test]
async fn test_borrow_precondition_failed() {
    let (deps, api, notifier) = setup(false);
    api.fail_borrow_with(status(412));

    let result = borrow_book(&deps, &book_with_available_copies(), &current_user()).await;

    assert_eq!(result, Err(LendingError::PreconditionFailed));
    assert_eq!(
        notifier.errors(),
        vec![LendingError::PreconditionFailed.to_string()]
    );
}

#[tokio::test]
async fn test_borrow_network_failure_is_generic() {
    let (deps, api, _) = setup(false);
    api.fail_borrow_with(ApiError::Network("connection refused".into()));

    let result = borrow_book(&deps, &book_with_available_copies(), &current_user()).await;

    assert!(matches!(result, Err(LendingError::Failure(_))));
}

// ============================================================================
// ウェイトリスト確認
// ============================================================================

#[tokio::test]
async fn test_borrow_with_no_waitlist_proceeds() {
    let (deps, api, _) = setup(true);
    let book = book_with_available_copies();

    let outcome = borrow_book(&deps, &book, &current_user()).await.unwrap();

    assert!(matches!(outcome, BorrowOutcome::Borrowed { .. }));
    assert_eq!(
        api.calls(),
        vec![
            ApiCall::CheckWaitlist(book.id),
            ApiCall::BorrowCopy(CopyId::new(1), current_user().email),
        ]
    );
}

#[tokio::test]
async fn test_borrow_when_first_on_waitlist_proceeds() {
    let (deps, api, _) = setup(true);
    api.set_waitlist(WaitlistCheck {
        status: WaitlistStatus::FirstOnWaitlist,
        users: vec![current_user().email],
    });

    let outcome = borrow_book(&deps, &book_with_available_copies(), &current_user())
        .await
        .unwrap();

    assert!(matches!(outcome, BorrowOutcome::Borrowed { .. }));
    assert_eq!(api.borrow_calls(), vec![CopyId::new(1)]);
}

#[tokio::test]
async fn test_borrow_when_others_waiting_requires_confirmation() {
    let (deps, api, notifier) = setup(true);
    api.set_waitlist(others_waiting(&[
        "someuser@example.com",
        "someotheruser@example.com",
    ]));
    let book = book_with_available_copies();

    let outcome = borrow_book(&deps, &book, &current_user()).await.unwrap();

    let BorrowOutcome::ConfirmationRequired { waiting_users } = outcome else {
        panic!("expected confirmation to be required");
    };
    assert_eq!(
        waiting_users_message(&waiting_users),
        "Users on the wait list: someuser@example.com, someotheruser@example.com"
    );
    assert!(api.borrow_calls().is_empty());
    assert!(notifier.toasts().is_empty());
}

#[tokio::test]
async fn test_confirm_borrow_skips_waitlist_check() {
    let (deps, api, _) = setup(true);
    api.set_waitlist(others_waiting(&["someuser@example.com"]));
    let book = book_with_available_copies();

    let outcome = confirm_borrow(&deps, &book, &current_user()).await.unwrap();

    assert!(matches!(outcome, BorrowOutcome::Borrowed { .. }));
    assert_eq!(
        api.calls(),
        vec![ApiCall::BorrowCopy(CopyId::new(1), current_user().email)]
    );
}

#[tokio::test]
async fn test_waitlist_disabled_never_checks_waitlist() {
    let (deps, api, _) = setup(false);
    api.set_waitlist(others_waiting(&["someuser@example.com"]));

    let outcome = borrow_book(&deps, &book_with_available_copies(), &current_user())
        .await
        .unwrap();

    assert!(matches!(outcome, BorrowOutcome::Borrowed { .. }));
    assert!(!api
        .calls()
        .iter()
        .any(|c| matches!(c, ApiCall::CheckWaitlist(_))));
}

#[tokio::test]
async fn test_waitlist_check_failure_aborts_borrow() {
    let (deps, api, notifier) = setup(true);
    api.fail_waitlist_with(status(500));

    let result = borrow_book(&deps, &book_with_available_copies(), &current_user()).await;

    assert!(matches!(result, Err(LendingError::Failure(_))));
    assert!(api.borrow_calls().is_empty());
    assert_eq!(notifier.errors().len(), 1);
}

// ============================================================================
// 返却
// ============================================================================

#[tokio::test]
async fn test_return_book_borrowed_by_user() {
    let (deps, api, notifier) = setup(true);
    let book = book_with_a_copy_from_me();

    let outcome = return_book(&deps, &book, &current_user()).await.unwrap();

    let ReturnOutcome::Returned { book: updated, event } = outcome else {
        panic!("expected returned outcome");
    };
    assert_eq!(updated.copies[0].user, None);
    assert_eq!(event.copy_id, CopyId::new(1));
    assert_eq!(api.return_calls(), vec![CopyId::new(1)]);
    assert_eq!(
        notifier.toasts(),
        vec![Toast::Success("Book has returned to library.".to_string())]
    );
}

#[tokio::test]
async fn test_return_book_not_borrowed_by_user_is_noop() {
    let (deps, api, _) = setup(true);
    let book = book_with_no_available_copies();

    let outcome = return_book(&deps, &book, &current_user()).await.unwrap();

    assert_eq!(outcome, ReturnOutcome::NotBorrowedByUser);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_return_precondition_required() {
    let (deps, api, notifier) = setup(true);
    api.fail_return_with(status(428));
    let book = book_with_a_copy_from_me();

    let result = return_book(&deps, &book, &current_user()).await;

    assert_eq!(result, Err(LendingError::PreconditionRequired));
    assert_eq!(
        notifier.errors(),
        vec![LendingError::PreconditionRequired.to_string()]
    );
    assert_eq!(book.copies[0].user, Some(current_user()));
}

#[tokio::test]
async fn test_return_failure_is_generic_for_other_statuses() {
    let (deps, api, _) = setup(true);
    api.fail_return_with(status(500));

    let result = return_book(&deps, &book_with_a_copy_from_me(), &current_user()).await;

    assert_eq!(result, Err(LendingError::Failure(status(500))));
}

// ============================================================================
// ウェイトリスト登録・解除、その他
// ============================================================================

#[tokio::test]
async fn test_join_and_leave_waitlist() {
    let (deps, api, _) = setup(true);
    let book = book_with_no_available_copies();

    let joined = join_waitlist(&deps, &book).await.unwrap();
    assert!(joined.is_on_user_waitlist);
    assert!(joined.waitlist_added_date.is_some());

    let left = leave_waitlist(&deps, &joined).await.unwrap();
    assert!(!left.is_on_user_waitlist);

    assert_eq!(
        api.calls(),
        vec![ApiCall::JoinWaitlist(book.id), ApiCall::LeaveWaitlist(book.id)]
    );
}

#[tokio::test]
async fn test_join_waitlist_failure_keeps_flag() {
    let (deps, api, notifier) = setup(true);
    api.fail_join_with(status(500));
    let book = book_with_no_available_copies();

    let result = join_waitlist(&deps, &book).await;

    assert!(result.is_err());
    assert!(!book.is_on_user_waitlist);
    assert_eq!(notifier.errors().len(), 1);
}

#[tokio::test]
async fn test_leave_waitlist_not_found() {
    let (deps, api, _) = setup(true);
    api.fail_leave_with(status(404));

    let result = leave_waitlist(&deps, &book_with_no_available_copies()).await;

    assert_eq!(result, Err(LendingError::NotFound));
}

#[tokio::test]
async fn test_refresh_copy_replaces_copy_with_server_version() {
    let (deps, api, _) = setup(true);
    let book = some_book(1, vec![copy(1, None), copy(2, None)]);
    let server_copy = BookCopy {
        id: CopyId::new(2),
        user: Some(current_user()),
        last_loan: Some(LastLoan {
            id: LoanId::new(10),
            email: current_user().email,
            loan_date: chrono::Utc::now(),
        }),
    };
    api.add_copy(server_copy.clone());

    let refreshed = refresh_copy(&deps, &book, CopyId::new(2)).await.unwrap();

    assert_eq!(refreshed.copies[1], server_copy);
    assert_eq!(refreshed.copies[0], book.copies[0]);
}

#[tokio::test]
async fn test_refresh_unknown_copy_is_not_found_without_toast() {
    let (deps, _, notifier) = setup(true);

    let result = refresh_copy(&deps, &book_with_available_copies(), CopyId::new(99)).await;

    assert_eq!(result, Err(LendingError::NotFound));
    assert!(notifier.toasts().is_empty());
}

#[tokio::test]
async fn test_list_libraries() {
    let (deps, api, _) = setup(true);
    api.set_libraries(vec![
        Library {
            id: LibraryId::new(1),
            name: "Quito".to_string(),
            slug: LibrarySlug::new("quito"),
        },
        Library {
            id: LibraryId::new(2),
            name: "Belo Horizonte".to_string(),
            slug: LibrarySlug::new("bh"),
        },
    ]);

    let libraries = list_libraries(&deps).await.unwrap();

    assert_eq!(libraries.len(), 2);
    assert_eq!(libraries[1].slug, LibrarySlug::new("bh"));
    assert_eq!(api.calls(), vec![ApiCall::GetLibraries]);
}
