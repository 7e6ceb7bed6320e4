use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{BookSelector, DisplayBook};
use crate::lock::ImportLock;
use crate::store::{KvStorage, LibraryStore};
use std::path::Path;

use super::helpers::resolve_selectors;

/// Permanently removes the selected books.
///
/// `confirm` is shown the resolved books and decides whether to go ahead;
/// the CLI asks the user, `--yes` passes a closure that always agrees.
///
/// Confirmation can take a while, so the library lock in `lock_dir` is only
/// taken afterwards and the library re-read under it. Books are removed by
/// id; one that another run already removed is reported and skipped.
pub fn run<S, F>(
    store: &mut LibraryStore<S>,
    lock_dir: &Path,
    selectors: &[BookSelector],
    confirm: F,
) -> Result<CmdResult>
where
    S: KvStorage,
    F: FnOnce(&[DisplayBook]) -> Result<bool>,
{
    let targets = resolve_selectors(store, selectors)?;
    if targets.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No books to delete."));
        return Ok(res);
    }

    if !confirm(&targets)? {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("Operation cancelled."));
        return Ok(res);
    }

    let _lock = ImportLock::acquire(lock_dir)?;
    store.reload()?;

    let mut result = CmdResult::default();
    for db in targets {
        if store.delete(&db.book.id)? == 0 {
            result.add_message(CmdMessage::info(format!(
                "Already removed: {}",
                db.book.title
            )));
            continue;
        }
        result.add_message(CmdMessage::success(format!(
            "Deleted ({}): {}",
            db.index, db.book.title
        )));
        result.affected_books.push(db.book);
    }

    Ok(result)
}
