use crate::builder;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::extract::{Extractor, PdfCapability, WordCapability};
use crate::lock::ImportLock;
use crate::messages;
use crate::store::{KvStorage, LibraryStore};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Imports `paths` one after another. Each file succeeds or fails on its own;
/// a failure leaves the library as it was for that file.
///
/// The import lock in `lock_dir` is held for the whole batch, so a second
/// import running at the same time fails with `ImportInProgress`. The
/// library is re-read once the lock is held, so books written by another
/// run since this one opened the library are kept.
pub fn run<S, P, W>(
    store: &mut LibraryStore<S>,
    extractor: &Extractor<P, W>,
    lock_dir: &Path,
    paths: &[PathBuf],
) -> Result<CmdResult>
where
    S: KvStorage,
    P: PdfCapability,
    W: WordCapability,
{
    let _lock = ImportLock::acquire(lock_dir)?;
    store.reload()?;
    let mut result = CmdResult::default();

    for path in paths {
        match import_file(store, extractor, path) {
            Ok((book, used_placeholder)) => {
                if used_placeholder {
                    result.add_message(CmdMessage::warning(format!(
                        "{}: {}",
                        book.title,
                        book.content
                    )));
                }
                result.add_message(CmdMessage::success(format!(
                    "Imported: {}",
                    book.title
                )));
                result.affected_books.push(book);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "import failed");
                result.add_message(CmdMessage::error(format!("{}: {}", path.display(), e)));
            }
        }
    }

    if paths.len() > 1 {
        result.add_message(CmdMessage::info(format!(
            "Total imported: {} of {}",
            result.affected_books.len(),
            paths.len()
        )));
    }
    if result.affected_books.is_empty() && !paths.is_empty() {
        result.add_message(CmdMessage::error(messages::IMPORT_FAILED));
    }

    Ok(result)
}

fn import_file<S, P, W>(
    store: &mut LibraryStore<S>,
    extractor: &Extractor<P, W>,
    path: &Path,
) -> Result<(crate::model::Book, bool)>
where
    S: KvStorage,
    P: PdfCapability,
    W: WordCapability,
{
    let extraction = extractor.extract_file(path)?;
    let used_placeholder = extraction.used_placeholder;
    let book = builder::build(extraction);
    store.insert(book.clone())?;
    info!(path = %path.display(), id = %book.id, "imported");
    Ok((book, used_placeholder))
}
