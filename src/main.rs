use library_lending_client::{
    adapters::{
        console::ConsoleNotifier,
        http::HttpLendingApi,
        mock::{Location as MemoryLocation, UserPreferences as MemoryPreferences},
    },
    application::{
        browser::{BrowserDependencies, LibraryBrowser, LoadOutcome},
        lending::{LendingDependencies, list_libraries},
    },
    config::ClientConfig,
    domain::{Book, BookAction, BookId, LibrarySlug},
    presentation::BookCard,
};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage:
  library-lending-client libraries
  library-lending-client books <slug> [search term]
  library-lending-client borrow|return|join|leave <slug> <book id>";

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_lending_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = ClientConfig::from_env();
    tracing::debug!(api_url = %config.api_url, user = %config.user.email, "configuration loaded");

    let api = Arc::new(HttpLendingApi::new(config.api_url.clone()));
    let lending = LendingDependencies {
        api: api.clone(),
        notifier: Arc::new(ConsoleNotifier),
        waitlist_enabled: config.waitlist_enabled,
    };
    let browsing = BrowserDependencies {
        api,
        location: Arc::new(MemoryLocation::default()),
        preferences: Arc::new(MemoryPreferences::new()),
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["libraries"] => match list_libraries(&lending).await {
            Ok(libraries) => {
                for library in libraries {
                    println!("{:<12} {}", library.slug.as_str(), library.name);
                }
                ExitCode::SUCCESS
            }
            Err(_) => ExitCode::FAILURE,
        },
        ["books", slug, search @ ..] => {
            let browser = LibraryBrowser::new(browsing, LibrarySlug::new(*slug));
            let outcome = browser.set_search_term(&search.join(" ")).await;
            let state = browser.snapshot();
            for book in &state.items {
                print_book(book);
            }
            if state.has_more {
                println!("... more books available");
            }
            if outcome == LoadOutcome::Failed {
                eprintln!("could not load books for {}", slug);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        [command @ ("borrow" | "return" | "join" | "leave"), slug, id] => {
            let Ok(id) = id.parse::<u64>() else {
                eprintln!("{}", USAGE);
                return ExitCode::FAILURE;
            };
            let expected = match *command {
                "borrow" => BookAction::Borrow,
                "return" => BookAction::Return,
                "join" => BookAction::JoinWaitlist,
                _ => BookAction::LeaveWaitlist,
            };

            let browser = LibraryBrowser::new(browsing, LibrarySlug::new(*slug));
            let Some(book) = find_book(&browser, BookId::new(id)).await else {
                eprintln!("book {} not found in {}", id, slug);
                return ExitCode::FAILURE;
            };

            let mut card = BookCard::new(lending, config.user, book);
            if card.action() != expected {
                eprintln!("cannot {} this book right now", command);
                return ExitCode::FAILURE;
            }

            if card.click_action().await.is_err() {
                return ExitCode::FAILURE;
            }

            if let Some(dialog) = card.dialog() {
                println!("{}", dialog.message());
                if ask(dialog.prompt()) {
                    if card.confirm().await.is_err() {
                        return ExitCode::FAILURE;
                    }
                } else {
                    card.cancel();
                }
            }

            print_book(card.book());
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("{}", USAGE);
            ExitCode::FAILURE
        }
    }
}

/// 書籍が見つかるまでページを読み進める
async fn find_book(browser: &LibraryBrowser, id: BookId) -> Option<Book> {
    loop {
        if let LoadOutcome::Failed | LoadOutcome::Skipped = browser.load().await {
            return None;
        }
        let state = browser.snapshot();
        if let Some(book) = state.items.iter().find(|b| b.id == id) {
            return Some(book.clone());
        }
        if !state.has_more {
            return None;
        }
    }
}

fn print_book(book: &Book) {
    let free = book.copies.iter().filter(|c| c.is_available()).count();
    println!(
        "#{:<5} {} - {} ({}/{} available)",
        book.id.value(),
        book.title,
        book.author,
        free,
        book.copies.len()
    );
}

fn ask(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
