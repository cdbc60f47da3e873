//! # Dotnote Architecture
//!
//! Dotnote keeps notes as plain files under one root directory and addresses
//! them by dotted names: `project.meeting.md` lives at `project/meeting.md`.
//! It is a library with a CLI client, not the other way round.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders listings, reads keystrokes     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Parses type names, sort keys and `/N` references         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - resolve target → confirm if destructive → act → report   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core: names, resolver, pager, cache                        │
//! │  Storage: NoteStore trait, FileStore / InMemoryStore        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Session
//!
//! Commands receive a [`session::Session`] rather than reaching for global
//! state. It owns the store, the [`cache::SelectionCache`] refreshed by every
//! listing, and the four interactive collaborators: [`prompt::Prompter`],
//! [`editor::Opener`], [`finder::FuzzyFinder`] and
//! [`searcher::ContentSearcher`]. Production wires processes and the
//! terminal into these; tests wire scripted doubles from `test_utils`.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never calls
//! `std::process::exit`. Logging goes through `tracing`; the binary decides
//! where it ends up.
//!
//! ## Module Overview
//!
//! - [`names`]: name validation and the dotted-name/path mapping
//! - [`model`]: note types, note files, sort keys, queries
//! - [`resolver`]: the exact → pattern → fuzzy resolution ladder
//! - [`pager`]: paged listings that feed the selection cache
//! - [`cache`]: the selection cache and `/N` references
//! - [`commands`]: one module per operation
//! - [`api`]: the facade every UI goes through
//! - [`store`]: storage abstraction and implementations
//! - [`config`], [`init`]: settings and production wiring
//! - [`error`]: error kinds and their exit codes

pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod finder;
pub mod init;
pub mod model;
pub mod names;
pub mod pager;
pub mod prompt;
pub mod resolver;
pub mod searcher;
pub mod session;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
