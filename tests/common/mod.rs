#![allow(dead_code)]

use library_lending_client::domain::*;

// テスト用の書籍データ。各テストファイルから必要なものだけを使う。

pub fn current_user() -> User {
    User::new("currentuser@example.com", "currentuser@example.com")
}

pub fn some_user() -> User {
    User::new("someuser@example.com", "someuser@example.com")
}

pub fn copy(id: u64, user: Option<User>) -> BookCopy {
    BookCopy {
        id: CopyId::new(id),
        user,
        last_loan: None,
    }
}

pub fn some_book(id: u64, copies: Vec<BookCopy>) -> Book {
    Book {
        id: BookId::new(id),
        title: format!("Book {}", id),
        author: "Some Author".to_string(),
        image_url: Some(format!("http://example.com/covers/{}.png", id)),
        copies,
        is_on_user_waitlist: false,
        waitlist_added_date: None,
    }
}

pub fn book_with_available_copies() -> Book {
    some_book(1, vec![copy(1, None)])
}

pub fn book_with_no_available_copies() -> Book {
    some_book(1, vec![copy(1, Some(some_user()))])
}

pub fn book_with_a_copy_from_me() -> Book {
    some_book(1, vec![copy(1, Some(current_user()))])
}

pub fn book_page(books: Vec<Book>, next: Option<&str>) -> BookPage {
    BookPage {
        count: books.len() as u64,
        next: next.map(str::to_string),
        previous: None,
        results: books,
    }
}

/// 2冊入りのページ
pub fn two_book_page(next: Option<&str>) -> BookPage {
    book_page(
        vec![
            some_book(1, vec![copy(1, None)]),
            some_book(2, vec![copy(2, Some(some_user()))]),
        ],
        next,
    )
}
