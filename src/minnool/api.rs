//! # API Facade
//!
//! The single entry point for minnool operations, whatever the UI. It owns
//! the library store and the extractor, turns raw user input (selector
//! strings, line ranges) into typed values, and dispatches to the command
//! layer.
//!
//! The facade does no business logic and no terminal I/O. It returns
//! `Result<CmdResult>` and leaves rendering, clipboard and browser access to
//! the client.
//!
//! `MinnoolApi<S>` is generic over [`KvStorage`]: production runs on
//! [`FileKv`](crate::store::fs::FileKv), tests on
//! [`MemoryKv`](crate::store::memory::MemoryKv).

use crate::cleanup::TextCleaner;
use crate::commands;
use crate::error::{MinnoolError, Result};
use crate::extract::{DocxText, Extractor, PdfCapability, PdfExtract, WordCapability};
use crate::index::{self, BookSelector, DisplayBook};
use crate::selection::LineRange;
use crate::share::ShareTarget;
use crate::store::{KvStorage, LibraryStore, LoadOutcome};
use std::path::PathBuf;

pub struct MinnoolApi<S: KvStorage, P = PdfExtract, W = DocxText> {
    store: LibraryStore<S>,
    extractor: Extractor<P, W>,
    paths: commands::MinnoolPaths,
}

impl<S: KvStorage> MinnoolApi<S> {
    /// Opens the library in `storage` with the production parsing engines.
    pub fn new(storage: S, paths: commands::MinnoolPaths) -> Self {
        Self::with_extractor(storage, Extractor::default(), paths)
    }
}

impl<S, P, W> MinnoolApi<S, P, W>
where
    S: KvStorage,
    P: PdfCapability,
    W: WordCapability,
{
    pub fn with_extractor(
        storage: S,
        extractor: Extractor<P, W>,
        paths: commands::MinnoolPaths,
    ) -> Self {
        Self {
            store: LibraryStore::open(storage),
            extractor,
            paths,
        }
    }

    /// How the library was hydrated when the API was created.
    pub fn load_outcome(&self) -> &LoadOutcome {
        self.store.load_outcome()
    }

    pub fn import_books(&mut self, files: &[PathBuf]) -> Result<commands::CmdResult> {
        commands::import::run(
            &mut self.store,
            &self.extractor,
            &self.paths.data_dir,
            files,
        )
    }

    pub fn list_books(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn read_book<I: AsRef<str>>(
        &self,
        selectors: &[I],
        lines: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::read::run(&self.store, &selectors, parse_lines(lines)?)
    }

    pub fn copy_book<I: AsRef<str>>(
        &self,
        selectors: &[I],
        lines: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::copy::run(&self.store, &selectors, parse_lines(lines)?)
    }

    pub fn share_book<I: AsRef<str>>(
        &self,
        selectors: &[I],
        target: ShareTarget,
        lines: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::share::run(&self.store, &selectors, target, parse_lines(lines)?)
    }

    pub fn delete_books<I, F>(&mut self, selectors: &[I], confirm: F) -> Result<commands::CmdResult>
    where
        I: AsRef<str>,
        F: FnOnce(&[DisplayBook]) -> Result<bool>,
    {
        let selectors = parse_selectors(selectors)?;
        commands::delete::run(&mut self.store, &self.paths.data_dir, &selectors, confirm)
    }

    pub fn clean_book<I: AsRef<str>, C: TextCleaner + ?Sized>(
        &self,
        selectors: &[I],
        cleaner: &C,
    ) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::clean::run(&self.store, &selectors, cleaner)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &commands::MinnoolPaths {
        &self.paths
    }
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<BookSelector>> {
    let inputs: Vec<String> = inputs.iter().map(|s| s.as_ref().to_string()).collect();
    index::parse_selectors(&inputs).map_err(MinnoolError::Api)
}

fn parse_lines(lines: Option<&str>) -> Result<Option<LineRange>> {
    lines.map(str::parse::<LineRange>).transpose()
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, MinnoolPaths};
