//! # Storage Layer
//!
//! The library persists as a single entry in a key-value store. The
//! [`KvStorage`] trait is the "how" (filesystem or memory); the
//! [`library::LibraryStore`] on top of it is the "what" (ordering, schema,
//! recovery, rollback).
//!
//! ## Implementations
//!
//! - [`fs::FileKv`]: production storage, one JSON file per key inside the
//!   data directory. Writes go to a temporary file first and are renamed
//!   into place.
//! - [`memory::MemoryKv`]: in-memory storage for tests, with write-error
//!   simulation.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── tamil_pdf_reader_books.json   # {"version": 1, "books": [...]}
//! ├── config.json                   # user configuration
//! └── import.lock                   # present only while an import runs
//! ```

use crate::error::Result;

pub mod fs;
pub mod library;
pub mod memory;

pub use library::{LibraryStore, LoadOutcome};

/// The key under which the book collection is stored.
pub const STORAGE_KEY: &str = "tamil_pdf_reader_books";

/// Abstract interface for raw key-value storage.
///
/// Methods take `&self`: backends that need mutation use interior
/// mutability, since minnool is single-threaded.
pub trait KvStorage {
    /// Returns `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value for `key`.
    /// MUST be atomic: readers see either the old or the new value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KvStorage + ?Sized> KvStorage for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
