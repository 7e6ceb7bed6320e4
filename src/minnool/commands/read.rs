use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::BookSelector;
use crate::selection::LineRange;
use crate::store::{KvStorage, LibraryStore};

use super::helpers::resolve_one;

/// Returns the text of one book, or only the given lines of it.
pub fn run<S: KvStorage>(
    store: &LibraryStore<S>,
    selectors: &[BookSelector],
    lines: Option<LineRange>,
) -> Result<CmdResult> {
    let db = resolve_one(store, selectors)?;
    let mut result = CmdResult::default();

    match lines {
        None => result.text = Some(db.book.content.clone()),
        Some(range) => match range.apply(&db.book.content) {
            Some(text) => result.text = Some(text),
            None => result.add_message(CmdMessage::warning(format!(
                "Lines {} of \"{}\" contain no text",
                range, db.book.title
            ))),
        },
    }

    Ok(result.with_affected_books(vec![db.book]))
}
