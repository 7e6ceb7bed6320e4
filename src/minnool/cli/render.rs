//! Turns command results into terminal text.
//!
//! Every `render_*` function returns a `String` so output can be checked in
//! tests; the `*_internal` variants take an explicit colour switch.

use super::styles;
use chrono::{DateTime, Utc};
use colored::Colorize;
use minnool::api::{CmdMessage, MessageLevel};
use minnool::config::MinnoolConfig;
use minnool::index::DisplayBook;
use minnool::messages;
use minnool::model::Book;
use std::io::IsTerminal;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const TIME_WIDTH: usize = 16;
const SWATCH: &str = "██";
const RULE_CHAR: &str = "─";

fn stdout_has_color() -> bool {
    std::io::stdout().is_terminal()
}

pub fn render_book_list(books: &[DisplayBook]) -> String {
    render_book_list_internal(books, stdout_has_color())
}

fn render_book_list_internal(books: &[DisplayBook], use_color: bool) -> String {
    if books.is_empty() {
        return format!("{}\n{}\n", messages::LIBRARY_EMPTY, messages::LIBRARY_EMPTY_HINT);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        styles::HEADER
            .clone()
            .force_styling(use_color)
            .apply_to(messages::books_saved(books.len()))
    ));

    let idx_width = books.len().to_string().len() + 2;
    for db in books {
        let idx_str = format!("{:>width$}", format!("{}.", db.index), width = idx_width);
        let fixed_width = SWATCH.width() + 1 + idx_width + 1 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let title = truncate_to_width(&db.book.title, available);
        let padding = " ".repeat(available.saturating_sub(title.width()));

        out.push_str(&format!(
            "{} {} {}{}{}\n",
            styles::cover_style(&db.book.cover_color)
                .force_styling(use_color)
                .apply_to(SWATCH),
            styles::INDEX.clone().force_styling(use_color).apply_to(idx_str),
            title,
            padding,
            styles::TIME
                .clone()
                .force_styling(use_color)
                .apply_to(format_time_ago(db.book.imported_at)),
        ));
    }
    out
}

pub fn render_book(book: &Book, text: &str) -> String {
    render_book_internal(book, text, stdout_has_color())
}

fn render_book_internal(book: &Book, text: &str, use_color: bool) -> String {
    let title = styles::TITLE.clone().force_styling(use_color).apply_to(&book.title);
    let width = book.title.width().clamp(8, LINE_WIDTH);
    let rule = styles::RULE
        .clone()
        .force_styling(use_color)
        .apply_to(RULE_CHAR.repeat(width));
    format!("{}\n{}\n\n{}\n", title, rule, text)
}

pub fn render_config(config: &MinnoolConfig) -> String {
    MinnoolConfig::KEYS
        .iter()
        .map(|key| format!("{} = {}\n", key, config.get(key).unwrap_or_default()))
        .collect()
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            let line = match message.level {
                MessageLevel::Info => message.content.dimmed(),
                MessageLevel::Success => message.content.green(),
                MessageLevel::Warning => message.content.yellow(),
                MessageLevel::Error => message.content.red(),
            };
            format!("{}\n", line)
        })
        .collect()
}

/// Prints messages: errors and warnings to stderr, the rest to stdout.
pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        let line = render_messages(std::slice::from_ref(message));
        match message.level {
            MessageLevel::Warning | MessageLevel::Error => eprint!("{}", line),
            MessageLevel::Info | MessageLevel::Success => print!("{}", line),
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(imported_at_ms: i64) -> String {
    let Some(timestamp) = DateTime::<Utc>::from_timestamp_millis(imported_at_ms) else {
        return format!("{:>width$}", "?", width = TIME_WIDTH);
    };
    let duration = Utc::now().signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
