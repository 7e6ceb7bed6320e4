use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::BookSelector;
use crate::selection::LineRange;
use crate::store::{KvStorage, LibraryStore};

use super::helpers::resolve_one;

/// Picks the text to put on the clipboard: the selected lines if they hold
/// any text, otherwise the whole book.
pub fn run<S: KvStorage>(
    store: &LibraryStore<S>,
    selectors: &[BookSelector],
    lines: Option<LineRange>,
) -> Result<CmdResult> {
    let db = resolve_one(store, selectors)?;
    let selected = lines.and_then(|range| range.apply(&db.book.content));

    let mut result = CmdResult::default();
    let text = match selected {
        Some(text) => {
            result.add_message(CmdMessage::success(format!(
                "Copied selection from \"{}\" to clipboard",
                db.book.title
            )));
            text
        }
        None => {
            if let Some(range) = lines {
                result.add_message(CmdMessage::info(format!(
                    "Lines {} are empty, copying the whole book",
                    range
                )));
            }
            result.add_message(CmdMessage::success(format!(
                "Copied \"{}\" to clipboard",
                db.book.title
            )));
            db.book.content.clone()
        }
    };

    Ok(result.with_text(text).with_affected_books(vec![db.book]))
}
