//! # Storage Layer
//!
//! Notes are plain files under a single root directory; the directory layout
//! mirrors the dotted names (see [`crate::names`]). The [`NoteStore`] trait
//! hides the filesystem so command logic can be tested without touching disk.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production store over a real directory tree
//! - [`memory::InMemoryStore`]: virtual tree for tests
//!
//! Paths passed to and from the trait are relative to the root unless a field
//! says otherwise ([`NoteFile::path`] is absolute).

use crate::error::Result;
use crate::model::NoteFile;
use std::path::{Path, PathBuf};

pub mod fs;
pub mod memory;

pub trait NoteStore {
    /// The notes root.
    fn root(&self) -> &Path;

    /// All note files under the root, in no particular order.
    fn list_notes(&self) -> Result<Vec<NoteFile>>;

    /// The note at `relative`, if it exists.
    fn note(&self, relative: &Path) -> Result<Option<NoteFile>>;

    /// Creates an empty note, including missing parent directories.
    fn create_note(&mut self, relative: &Path) -> Result<NoteFile>;

    fn remove_note(&mut self, relative: &Path) -> Result<()>;

    /// Moves a note, creating destination parents as needed.
    fn move_note(&mut self, from: &Path, to: &Path) -> Result<NoteFile>;

    /// Removes empty directories deepest-first. The root itself is never removed.
    /// Returns the removed directories, relative to the root.
    fn prune_empty_dirs(&mut self) -> Result<Vec<PathBuf>>;

    /// Looks a note up by absolute path.
    fn note_at(&self, path: &Path) -> Result<Option<NoteFile>> {
        match path.strip_prefix(self.root()) {
            Ok(relative) => self.note(relative),
            Err(_) => Ok(None),
        }
    }
}
