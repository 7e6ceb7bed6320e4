use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{KvStorage, LibraryStore};

use super::helpers::indexed_books;

/// Lists every book, newest first.
pub fn run<S: KvStorage>(store: &LibraryStore<S>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_books(indexed_books(store)))
}
