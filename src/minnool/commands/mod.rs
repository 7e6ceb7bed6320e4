//! # Command layer
//!
//! One module per operation. Each `run` function works on a
//! [`LibraryStore`](crate::store::LibraryStore) and returns a [`CmdResult`]:
//! the books it touched or listed, any text to show, and user-facing
//! messages. Commands never print and never talk to the clipboard or the
//! browser; that is left to the UI client.

use crate::config::MinnoolConfig;
use crate::index::DisplayBook;
use crate::model::Book;
use std::path::PathBuf;

pub mod clean;
pub mod config;
pub mod copy;
pub mod delete;
pub mod helpers;
pub mod import;
pub mod list;
pub mod read;
pub mod share;

/// Where minnool keeps its files.
#[derive(Debug, Clone)]
pub struct MinnoolPaths {
    pub data_dir: PathBuf,
}

impl MinnoolPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_books: Vec<Book>,
    pub listed_books: Vec<DisplayBook>,
    /// Text produced for the user: book content, a selection, cleaned text.
    pub text: Option<String>,
    /// A share link, to be opened or printed.
    pub url: Option<String>,
    pub config: Option<MinnoolConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_books(mut self, books: Vec<Book>) -> Self {
        self.affected_books = books;
        self
    }

    pub fn with_listed_books(mut self, books: Vec<DisplayBook>) -> Self {
        self.listed_books = books;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_config(mut self, config: MinnoolConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// True when any message is an error. The CLI turns this into a
    /// non-zero exit code.
    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
