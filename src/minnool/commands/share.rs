use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::BookSelector;
use crate::selection::LineRange;
use crate::share::{share_message, share_url, ShareTarget};
use crate::store::{KvStorage, LibraryStore};

use super::helpers::resolve_one;

/// Builds the share link for one book or a selection of it.
pub fn run<S: KvStorage>(
    store: &LibraryStore<S>,
    selectors: &[BookSelector],
    target: ShareTarget,
    lines: Option<LineRange>,
) -> Result<CmdResult> {
    let db = resolve_one(store, selectors)?;
    let selection = lines.and_then(|range| range.apply(&db.book.content));
    let message = share_message(&db.book, selection.as_deref());
    let url = share_url(target, &message);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "Sharing \"{}\" to {}",
        db.book.title, target
    )));
    Ok(result.with_url(url).with_affected_books(vec![db.book]))
}
