//! # CLI Layer
//!
//! One possible UI client for minnool. This is the only place that parses
//! arguments, writes to stdout/stderr, touches the clipboard or the browser,
//! reads confirmation from stdin, and decides the exit code.
//!
//! - `run()`: dispatch, called by `main.rs`
//! - `init_context()`: resolves the data directory and builds the API
//! - `handle_*()`: per-command handlers that call the API and print

use super::render::{print_messages, render_book, render_book_list, render_config};
use super::setup::{Cli, Commands, ShareTargetArg};
use clap::Parser;
use directories::ProjectDirs;
use minnool::api::{ConfigAction, MinnoolApi, MinnoolPaths};
use minnool::cleanup::GeminiCleaner;
use minnool::clipboard::copy_to_clipboard;
use minnool::config::MinnoolConfig;
use minnool::error::{MinnoolError, Result};
use minnool::index::DisplayBook;
use minnool::messages;
use minnool::share::open_url;
use minnool::store::fs::FileKv;
use minnool::store::LoadOutcome;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "MINNOOL_HOME";
/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "MINNOOL_LOG";

struct AppContext {
    api: MinnoolApi<FileKv>,
}

/// Outcome of a handler: `Ok(true)` when something the user asked for
/// failed and the process should exit non-zero.
type Handled = Result<bool>;

pub fn run() -> Result<bool> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context()?;
    report_load_outcome(ctx.api.load_outcome());

    match cli.command {
        Some(Commands::Import { files }) => handle_import(&mut ctx, files),
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Read { book, lines }) => handle_read(&ctx, book, lines),
        Some(Commands::Copy { book, lines }) => handle_copy(&ctx, book, lines),
        Some(Commands::Share {
            target,
            book,
            lines,
            print,
        }) => handle_share(&ctx, target, book, lines, print),
        Some(Commands::Delete { books, yes }) => handle_delete(&mut ctx, books, yes),
        Some(Commands::Clean { book }) => handle_clean(&ctx, book),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("org", "minnool", "minnool")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| MinnoolError::Store("Could not determine data directory".to_string()))
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir()?;
    debug!(data_dir = %data_dir.display(), "opening library");

    let store = FileKv::new(&data_dir);
    let api = MinnoolApi::new(store, MinnoolPaths::new(data_dir));
    Ok(AppContext { api })
}

fn report_load_outcome(outcome: &LoadOutcome) {
    if let LoadOutcome::Recovered { reason, backup_key } = outcome {
        eprintln!("Warning: library data could not be read ({}).", reason);
        if let Some(key) = backup_key {
            eprintln!("The unreadable data was saved as {}.json", key);
        }
    }
}

fn handle_import(ctx: &mut AppContext, files: Vec<PathBuf>) -> Handled {
    let result = ctx.api.import_books(&files)?;
    print_messages(&result.messages);
    Ok(result.has_errors())
}

fn handle_list(ctx: &AppContext) -> Handled {
    let result = ctx.api.list_books()?;
    print!("{}", render_book_list(&result.listed_books));
    print_messages(&result.messages);
    Ok(false)
}

fn handle_read(ctx: &AppContext, book: Vec<String>, lines: Option<String>) -> Handled {
    let result = ctx.api.read_book(&book, lines.as_deref())?;
    if let (Some(text), Some(book)) = (&result.text, result.affected_books.first()) {
        print!("{}", render_book(book, text));
    }
    print_messages(&result.messages);
    Ok(false)
}

fn handle_copy(ctx: &AppContext, book: Vec<String>, lines: Option<String>) -> Handled {
    let result = ctx.api.copy_book(&book, lines.as_deref())?;
    if let Some(text) = &result.text {
        copy_to_clipboard(text)?;
    }
    print_messages(&result.messages);
    Ok(false)
}

fn handle_share(
    ctx: &AppContext,
    target: ShareTargetArg,
    book: Vec<String>,
    lines: Option<String>,
    print: bool,
) -> Handled {
    let result = ctx.api.share_book(&book, target.into(), lines.as_deref())?;
    let Some(url) = &result.url else {
        print_messages(&result.messages);
        return Ok(true);
    };

    if print {
        println!("{}", url);
        return Ok(false);
    }
    print_messages(&result.messages);
    // Fire and forget: the browser's exit status is never checked.
    if let Err(e) = open_url(url) {
        eprintln!("Warning: {}", e);
        println!("{}", url);
    }
    Ok(false)
}

fn confirm_delete(targets: &[DisplayBook]) -> Result<bool> {
    for db in targets {
        println!("  {}. {}", db.index, db.book.title);
    }
    print!("{} [y/N]: ", messages::CONFIRM_DELETE);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(matches!(input.trim(), "y" | "Y" | "yes" | "ஆம்"))
}

fn handle_delete(ctx: &mut AppContext, books: Vec<String>, yes: bool) -> Handled {
    let result = if yes {
        ctx.api.delete_books(&books, |_| Ok(true))?
    } else {
        ctx.api.delete_books(&books, confirm_delete)?
    };
    print_messages(&result.messages);
    Ok(result.has_errors())
}

fn handle_clean(ctx: &AppContext, book: Vec<String>) -> Handled {
    let config = MinnoolConfig::load(&ctx.api.paths().data_dir)?;
    let cleaner = GeminiCleaner::from_config(&config);
    let result = ctx.api.clean_book(&book, &cleaner)?;
    print_messages(&result.messages);
    if let Some(text) = &result.text {
        println!("{}", text);
    }
    Ok(false)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Handled {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let showing_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if showing_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(result.has_errors())
}
