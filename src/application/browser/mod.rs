mod library_browser;
mod query_string;

#[allow(unused_imports)]
pub use library_browser::{BrowserDependencies, LibraryBrowser, LibraryState, LoadOutcome};
#[allow(unused_imports)]
pub use query_string::{SEARCH_PARAM, search_term_from_query, with_search_term};
