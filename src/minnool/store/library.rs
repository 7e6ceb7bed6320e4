//! The persisted book collection.
//!
//! The whole collection is held in memory, newest first, and re-serialized
//! on every mutation. A mutation is committed only once the write succeeds;
//! on failure the in-memory change is undone, so memory and storage never
//! disagree.
//!
//! Loading never fails. Unreadable data is copied aside to
//! `<key>.corrupt-<epoch ms>` and the library starts empty.

use super::{KvStorage, STORAGE_KEY};
use crate::error::{MinnoolError, Result};
use crate::model::Book;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// What happened when the collection was hydrated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was stored yet.
    Fresh,
    /// Stored data was read. `legacy` is set for the unversioned bare-array
    /// layout, which is upgraded on the next write.
    Loaded { legacy: bool },
    /// Stored data could not be read and the library was reset to empty.
    Recovered {
        reason: String,
        backup_key: Option<String>,
    },
}

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    version: u32,
    books: &'a [Book],
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    #[serde(default)]
    books: Vec<Book>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Stored {
    Versioned(Envelope),
    Legacy(Vec<Book>),
}

fn decode(raw: &str) -> std::result::Result<(Vec<Book>, bool), String> {
    match serde_json::from_str::<Stored>(raw) {
        Ok(Stored::Legacy(books)) => Ok((books, true)),
        Ok(Stored::Versioned(env)) if env.version <= SCHEMA_VERSION => Ok((env.books, false)),
        Ok(Stored::Versioned(env)) => Err(format!(
            "unsupported schema version {} (this build reads up to {})",
            env.version, SCHEMA_VERSION
        )),
        Err(e) => Err(format!("malformed library data: {}", e)),
    }
}

/// Reads the collection stored under `key`.
pub fn load<S: KvStorage>(storage: &S, key: &str) -> (Vec<Book>, LoadOutcome) {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (Vec::new(), LoadOutcome::Fresh),
        Err(e) => {
            warn!(key, error = %e, "library storage unreadable, starting empty");
            return (
                Vec::new(),
                LoadOutcome::Recovered {
                    reason: e.to_string(),
                    backup_key: None,
                },
            );
        }
    };

    match decode(&raw) {
        Ok((books, legacy)) => {
            debug!(key, count = books.len(), legacy, "library loaded");
            (books, LoadOutcome::Loaded { legacy })
        }
        Err(reason) => {
            let backup = format!("{}.corrupt-{}", key, Utc::now().timestamp_millis());
            let backup_key = match storage.set(&backup, &raw) {
                Ok(()) => Some(backup),
                Err(e) => {
                    warn!(key, error = %e, "could not back up unreadable library");
                    None
                }
            };
            warn!(key, %reason, backup = ?backup_key, "library data unreadable, starting empty");
            (Vec::new(), LoadOutcome::Recovered { reason, backup_key })
        }
    }
}

/// Ordered, persisted collection of books (newest first).
pub struct LibraryStore<S: KvStorage> {
    storage: S,
    key: String,
    books: Vec<Book>,
    outcome: LoadOutcome,
}

impl<S: KvStorage> LibraryStore<S> {
    /// Hydrates the library from the default storage key.
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, STORAGE_KEY)
    }

    pub fn open_with_key(storage: S, key: &str) -> Self {
        let (books, outcome) = load(&storage, key);
        Self {
            storage,
            key: key.to_string(),
            books,
            outcome,
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    /// Re-reads the collection so a mutation starts from what is stored
    /// now, not from what was stored when the library was opened.
    ///
    /// Data that was already found unreadable (and copied aside) on open
    /// keeps the library empty; anything else that cannot be read is an
    /// error and leaves the in-memory collection alone.
    pub fn reload(&mut self) -> Result<()> {
        let Some(raw) = self.storage.get(&self.key)? else {
            self.books.clear();
            return Ok(());
        };
        match decode(&raw) {
            Ok((books, _)) => {
                debug!(key = %self.key, count = books.len(), "library reloaded");
                self.books = books;
                Ok(())
            }
            Err(_) if matches!(self.outcome, LoadOutcome::Recovered { .. }) => {
                self.books.clear();
                Ok(())
            }
            Err(reason) => Err(MinnoolError::Store(reason)),
        }
    }

    /// Prepends `book` and persists.
    pub fn insert(&mut self, book: Book) -> Result<()> {
        self.books.insert(0, book);
        if let Err(e) = self.persist() {
            self.books.remove(0);
            return Err(e);
        }
        if let Some(book) = self.books.first() {
            info!(id = %book.id, title = %book.title, "book added to library");
        }
        Ok(())
    }

    /// Removes every book with `id` and persists. Returns how many were
    /// removed; an empty or unknown id removes nothing and writes nothing.
    pub fn delete(&mut self, id: &str) -> Result<usize> {
        if id.is_empty() || !self.books.iter().any(|b| b.id == id) {
            return Ok(0);
        }

        let before = self.books.clone();
        self.books.retain(|b| b.id != id);
        let removed = before.len() - self.books.len();

        if let Err(e) = self.persist() {
            self.books = before;
            return Err(e);
        }
        info!(id, removed, "book removed from library");
        Ok(removed)
    }

    fn persist(&self) -> Result<()> {
        let payload = serde_json::to_string(&EnvelopeOut {
            version: SCHEMA_VERSION,
            books: &self.books,
        })?;
        self.storage.set(&self.key, &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryKv;

    fn book(id: &str, title: &str) -> Book {
        Book {
            id: id.into(),
            title: title.into(),
            author: None,
            content: format!("{} content", title),
            imported_at: 1_700_000_000_000,
            cover_color: "bg-rose-500".into(),
        }
    }

    fn stored(kv: &MemoryKv) -> serde_json::Value {
        serde_json::from_str(&kv.get(STORAGE_KEY).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn fresh_storage_loads_empty() {
        let store = LibraryStore::open(MemoryKv::new());
        assert!(store.is_empty());
        assert_eq!(store.load_outcome(), &LoadOutcome::Fresh);
    }

    #[test]
    fn insert_prepends_and_persists_envelope() {
        let kv = MemoryKv::new();
        let mut store = LibraryStore::open(&kv);
        store.insert(book("a", "A")).unwrap();
        store.insert(book("b", "B")).unwrap();

        let ids: Vec<&str> = store.books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let json = stored(&kv);
        assert_eq!(json["version"], 1);
        assert_eq!(json["books"][0]["id"], "b");
        assert_eq!(json["books"][1]["id"], "a");
    }

    #[test]
    fn reopen_round_trips_order() {
        let kv = MemoryKv::new();
        {
            let mut store = LibraryStore::open(&kv);
            store.insert(book("1", "one")).unwrap();
            store.insert(book("2", "two")).unwrap();
            store.insert(book("3", "three")).unwrap();
        }
        let store = LibraryStore::open(&kv);
        let ids: Vec<&str> = store.books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
        assert_eq!(store.load_outcome(), &LoadOutcome::Loaded { legacy: false });
    }

    #[test]
    fn delete_removes_and_keeps_order() {
        let kv = MemoryKv::new();
        let mut store = LibraryStore::open(&kv);
        for id in ["a", "b", "c"] {
            store.insert(book(id, id)).unwrap();
        }
        assert_eq!(store.delete("b").unwrap(), 1);

        let ids: Vec<&str> = store.books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
        assert_eq!(stored(&kv)["books"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn delete_unknown_or_empty_id_is_a_noop_without_write() {
        let kv = MemoryKv::new();
        let mut store = LibraryStore::open(&kv);
        store.insert(book("a", "A")).unwrap();

        kv.set_simulate_write_error(true);
        assert_eq!(store.delete("").unwrap(), 0);
        assert_eq!(store.delete("zzz").unwrap(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_absent_id_keeps_all_three_books() {
        let kv = MemoryKv::new();
        let mut store = LibraryStore::open(&kv);
        for id in ["a", "b", "c"] {
            store.insert(book(id, id)).unwrap();
        }

        assert_eq!(store.delete("missing").unwrap(), 0);
        let ids: Vec<&str> = store.books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert_eq!(stored(&kv)["books"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn second_delete_of_same_id_is_a_noop() {
        let kv = MemoryKv::new();
        let mut store = LibraryStore::open(&kv);
        for id in ["a", "b", "c"] {
            store.insert(book(id, id)).unwrap();
        }

        assert_eq!(store.delete("b").unwrap(), 1);
        let after_first = store.books().to_vec();
        let persisted = kv.get(STORAGE_KEY).unwrap();

        assert_eq!(store.delete("b").unwrap(), 0);
        assert_eq!(store.books(), after_first.as_slice());
        assert_eq!(kv.get(STORAGE_KEY).unwrap(), persisted);
    }

    #[test]
    fn reload_picks_up_writes_from_another_store() {
        let kv = MemoryKv::new();
        let mut stale = LibraryStore::open(&kv);
        stale.insert(book("old", "Old")).unwrap();

        let mut other = LibraryStore::open(&kv);
        other.insert(book("new", "New")).unwrap();

        stale.reload().unwrap();
        assert_eq!(stale.delete("old").unwrap(), 1);

        let reopened = LibraryStore::open(&kv);
        let ids: Vec<&str> = reopened.books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["new"]);
    }

    #[test]
    fn reload_refuses_data_that_turned_unreadable() {
        let kv = MemoryKv::new();
        let mut store = LibraryStore::open(&kv);
        store.insert(book("a", "A")).unwrap();

        kv.set(STORAGE_KEY, "{broken").unwrap();
        assert!(store.reload().is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn reload_after_recovery_stays_empty() {
        let kv = MemoryKv::new().with_entry(STORAGE_KEY, "{broken");
        let mut store = LibraryStore::open(&kv);
        store.reload().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn failed_insert_rolls_back() {
        let kv = MemoryKv::new();
        let mut store = LibraryStore::open(&kv);
        store.insert(book("a", "A")).unwrap();

        kv.set_simulate_write_error(true);
        assert!(store.insert(book("b", "B")).is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.books()[0].id, "a");
    }

    #[test]
    fn failed_delete_rolls_back() {
        let kv = MemoryKv::new();
        let mut store = LibraryStore::open(&kv);
        store.insert(book("a", "A")).unwrap();
        store.insert(book("b", "B")).unwrap();

        kv.set_simulate_write_error(true);
        assert!(store.delete("a").is_err());
        let ids: Vec<&str> = store.books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(stored(&kv)["books"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn malformed_data_is_backed_up_and_reset() {
        let kv = MemoryKv::new().with_entry(STORAGE_KEY, "{not json");
        let store = LibraryStore::open(&kv);

        assert!(store.is_empty());
        let backup_key = match store.load_outcome() {
            LoadOutcome::Recovered {
                backup_key: Some(key),
                ..
            } => key.clone(),
            other => panic!("unexpected outcome: {other:?}"),
        };
        assert!(backup_key.starts_with("tamil_pdf_reader_books.corrupt-"));
        assert_eq!(kv.get(&backup_key).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn next_write_after_recovery_replaces_corrupt_entry() {
        let kv = MemoryKv::new().with_entry(STORAGE_KEY, "42");
        let mut store = LibraryStore::open(&kv);
        store.insert(book("n", "new")).unwrap();

        let reopened = LibraryStore::open(&kv);
        assert_eq!(reopened.len(), 1);
        assert_eq!(kv.keys().len(), 2);
    }

    #[test]
    fn legacy_bare_array_loads_and_upgrades_on_write() {
        let legacy = r#"[{"id":"old","title":"Old","content":"c","importedAt":1,"coverColor":"bg-teal-500"}]"#;
        let kv = MemoryKv::new().with_entry(STORAGE_KEY, legacy);
        let mut store = LibraryStore::open(&kv);

        assert_eq!(store.load_outcome(), &LoadOutcome::Loaded { legacy: true });
        assert_eq!(store.books()[0].title, "Old");

        store.insert(book("new", "New")).unwrap();
        let json = stored(&kv);
        assert_eq!(json["version"], 1);
        assert_eq!(json["books"][1]["id"], "old");
    }

    #[test]
    fn future_schema_version_is_recovered() {
        let kv = MemoryKv::new().with_entry(STORAGE_KEY, r#"{"version":7,"books":[]}"#);
        let store = LibraryStore::open(&kv);

        assert!(store.is_empty());
        match store.load_outcome() {
            LoadOutcome::Recovered { reason, backup_key } => {
                assert!(reason.contains("version 7"));
                assert!(backup_key.is_some());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn unreadable_storage_starts_empty() {
        let kv = MemoryKv::new().with_entry(STORAGE_KEY, "[]");
        kv.set_simulate_read_error(true);
        let store = LibraryStore::open(&kv);

        assert!(store.is_empty());
        assert!(matches!(
            store.load_outcome(),
            LoadOutcome::Recovered {
                backup_key: None,
                ..
            }
        ));
    }
}
