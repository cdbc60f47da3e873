//! # Command Layer
//!
//! One submodule per user-facing operation. Each exposes a `run` function that
//! takes the [`Session`](crate::session::Session) plus already-parsed arguments
//! and returns a [`CmdResult`].
//!
//! Commands do not print, parse arguments or pick exit codes. Interaction goes
//! through the session's collaborators (prompter, opener, finder, searcher),
//! which is what lets every branch here be tested against an in-memory store
//! with scripted answers.
//!
//! Every command follows the same short pipeline: resolve the target, confirm
//! if destructive, act, report.
//!
//! - [`find`]: resolve a pattern and show a numbered listing
//! - [`create`]: create an empty note and open it
//! - [`open`]: resolve one note and open it
//! - [`paths`]: resolve one note and report its path
//! - [`delete`]: remove a note after confirmation, pruning empty directories
//! - [`rename`]: move a note to a new dotted name
//! - [`search`]: full-text search, then pick a hit in the finder
//! - [`types`]: the type registry
//! - [`config`]: show or change settings
//! - [`helpers`]: target selection shared by open, paths and delete

use crate::config::NotesConfig;
use crate::model::{NoteFile, NoteType};
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod delete;
pub mod find;
pub mod helpers;
pub mod open;
pub mod paths;
pub mod rename;
pub mod search;
pub mod types;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Notes created, opened, moved or removed.
    pub affected_notes: Vec<NoteFile>,
    /// The page left on screen by a listing (also the new selection cache).
    pub listed_notes: Vec<NoteFile>,
    pub note_paths: Vec<PathBuf>,
    pub note_types: Vec<NoteType>,
    pub config: Option<NotesConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_notes(mut self, notes: Vec<NoteFile>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<NoteFile>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_note_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.note_paths = paths;
        self
    }

    pub fn with_note_types(mut self, types: Vec<NoteType>) -> Self {
        self.note_types = types;
        self
    }

    pub fn with_config(mut self, config: NotesConfig) -> Self {
        self.config = Some(config);
        self
    }
}
