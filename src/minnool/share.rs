//! Sharing a book (or a selection of it) to a messaging service.
//!
//! Sharing only builds a URL; the service's own web page does the rest.
//! Opening the URL is fire-and-forget: the browser process is spawned and
//! never waited on.

use crate::error::{MinnoolError, Result};
use crate::messages;
use crate::model::Book;
use std::fmt;
use std::process::{Command, Stdio};
use tracing::debug;

/// Longest shared text, in characters, before truncation.
pub const MAX_SHARE_CHARS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    WhatsApp,
    Telegram,
}

impl fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareTarget::WhatsApp => write!(f, "WhatsApp"),
            ShareTarget::Telegram => write!(f, "Telegram"),
        }
    }
}

/// Builds the message text: a bold title line, a blank line, then either
/// the selection or the whole content, cut to [`MAX_SHARE_CHARS`].
pub fn share_message(book: &Book, selection: Option<&str>) -> String {
    let selection = selection.map(str::trim).filter(|s| !s.is_empty());
    let (text, marker) = match selection {
        Some(sel) => (sel, messages::SELECTION_MARKER),
        None => (book.content.as_str(), ""),
    };

    format!("*{}{}*\n\n{}", book.title, marker, truncate_chars(text))
}

fn truncate_chars(text: &str) -> String {
    match text.char_indices().nth(MAX_SHARE_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

pub fn share_url(target: ShareTarget, message: &str) -> String {
    let text = urlencoding::encode(message);
    match target {
        ShareTarget::WhatsApp => format!("https://wa.me/?text={}", text),
        ShareTarget::Telegram => format!(
            "https://t.me/share/url?url={}&text={}",
            urlencoding::encode(" "),
            text
        ),
    }
}

/// Opens `url` in the system browser without waiting for it.
pub fn open_url(url: &str) -> Result<()> {
    let mut command = browser_command(url);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| MinnoolError::Api(format!("Failed to open browser: {}", e)))?;
    debug!(url, "browser launched");
    Ok(())
}

fn browser_command(url: &str) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    }

    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(content: &str) -> Book {
        Book {
            id: "id".into(),
            title: "கம்பராமாயணம்".into(),
            author: None,
            content: content.into(),
            imported_at: 0,
            cover_color: "bg-amber-500".into(),
        }
    }

    #[test]
    fn full_content_message_has_no_marker() {
        let msg = share_message(&book("உரை"), None);
        assert_eq!(msg, "*கம்பராமாயணம்*\n\nஉரை");
    }

    #[test]
    fn selection_message_carries_marker() {
        let msg = share_message(&book("முழு உரை"), Some("  பகுதி  "));
        assert_eq!(msg, "*கம்பராமாயணம் (தேர்ந்தெடுக்கப்பட்ட பகுதி)*\n\nபகுதி");
    }

    #[test]
    fn blank_selection_falls_back_to_content() {
        let msg = share_message(&book("முழு"), Some(" \n "));
        assert_eq!(msg, "*கம்பராமாயணம்*\n\nமுழு");
    }

    #[test]
    fn long_text_is_cut_at_char_boundary() {
        let content = "அ".repeat(2500);
        let msg = share_message(&book(&content), None);
        let body = msg.split("\n\n").nth(1).unwrap();
        assert!(body.ends_with("..."));
        assert_eq!(body.chars().count(), MAX_SHARE_CHARS + 3);
    }

    #[test]
    fn exactly_max_chars_is_not_truncated() {
        let content = "x".repeat(MAX_SHARE_CHARS);
        let msg = share_message(&book(&content), None);
        assert!(!msg.ends_with("..."));
    }

    #[test]
    fn whatsapp_url_encodes_message() {
        let url = share_url(ShareTarget::WhatsApp, "*T*\n\na b&c");
        assert_eq!(url, "https://wa.me/?text=%2AT%2A%0A%0Aa%20b%26c");
    }

    #[test]
    fn telegram_url_has_blank_url_param() {
        let url = share_url(ShareTarget::Telegram, "hi");
        assert_eq!(url, "https://t.me/share/url?url=%20&text=hi");
    }
}
