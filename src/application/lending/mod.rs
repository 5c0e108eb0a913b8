mod errors;
mod lending_service;

#[allow(unused_imports)]
pub use errors::{LendingError, Result};
#[allow(unused_imports)]
pub use lending_service::{
    BorrowOutcome, LendingDependencies, ReturnOutcome, borrow_book, check_waitlist_gate,
    confirm_borrow, join_waitlist, leave_waitlist, list_libraries, refresh_copy, return_book,
};
