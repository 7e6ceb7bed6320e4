//! # Minnool Architecture
//!
//! Minnool (மின்னூல், "e-book") is a personal, Tamil-first reading library.
//! PDF and Word documents are imported, their text is extracted, and the
//! resulting books are kept in a small persistent library that can be read,
//! copied, shared or cleaned up.
//!
//! Like any UI-agnostic library, the core never assumes a terminal: the CLI
//! binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders output, exit codes             │
//! │  - Clipboard, browser and confirmation prompts              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (selectors → books, line ranges)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - import, list, read, copy, share, delete, clean, config   │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                           │
//!                 ▼                           ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Import pipeline              │ │  Storage Layer (store/)   │
//! │  extract/ → builder           │ │  LibraryStore over        │
//! │  (PDF + Word engines)         │ │  KvStorage (file, memory) │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## Import pipeline
//!
//! file bytes → [`extract::Extractor`] → `{title, content}` →
//! [`builder::build`] → [`model::Book`] → [`store::LibraryStore::insert`]
//! (prepended, persisted).
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never calls
//! `std::process::exit`. Diagnostics go through `tracing`; the binary decides
//! where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: business logic for each command
//! - [`extract`]: format detection and text extraction
//! - [`builder`]: turns extraction output into books
//! - [`store`]: persisted library and key-value backends
//! - [`model`]: `Book` and the cover palette
//! - [`index`]: display indexes and selectors
//! - [`selection`]: line-range selections
//! - [`share`]: WhatsApp / Telegram share links
//! - [`cleanup`]: optional remote text clean-up
//! - [`clipboard`]: cross-platform clipboard support
//! - [`lock`]: guard against overlapping imports
//! - [`config`]: configuration management
//! - [`messages`]: user-facing Tamil strings
//! - [`error`]: error types

pub mod api;
pub mod builder;
pub mod cleanup;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod index;
pub mod lock;
pub mod messages;
pub mod model;
pub mod selection;
pub mod share;
pub mod store;
