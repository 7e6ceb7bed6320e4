use crate::cleanup::{clean_or_raw, TextCleaner};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::BookSelector;
use crate::store::{KvStorage, LibraryStore};

use super::helpers::resolve_one;

/// Returns a cleaned-up rendition of a book's text. The stored book is left
/// untouched; when clean-up is unavailable the raw text comes back.
pub fn run<S: KvStorage, C: TextCleaner + ?Sized>(
    store: &LibraryStore<S>,
    selectors: &[BookSelector],
    cleaner: &C,
) -> Result<CmdResult> {
    let db = resolve_one(store, selectors)?;
    let cleaned = clean_or_raw(cleaner, &db.book.content);

    let mut result = CmdResult::default();
    if !cleaned.cleaned {
        result.add_message(CmdMessage::warning(
            "Text clean-up unavailable, showing the original text",
        ));
    }
    Ok(result
        .with_text(cleaned.text)
        .with_affected_books(vec![db.book]))
}
