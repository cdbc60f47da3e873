use super::NoteStore;
use crate::error::{NoteError, Result};
use crate::model::NoteFile;
use crate::names::to_dotted_name;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// In-memory note tree for testing. Does NOT persist data.
///
/// Timestamps come from a private clock that advances one minute per
/// mutation, so creation order is also timestamp order.
pub struct InMemoryStore {
    root: PathBuf,
    notes: BTreeMap<PathBuf, NoteFile>,
    dirs: BTreeSet<PathBuf>,
    clock: DateTime<Utc>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/notes"),
            notes: BTreeMap::new(),
            dirs: BTreeSet::new(),
            clock: Utc
                .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
                .single()
                .unwrap_or_default(),
        }
    }

    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += Duration::minutes(1);
        self.clock
    }

    fn add_parents(&mut self, relative: &Path) {
        let mut parent = relative.parent();
        while let Some(dir) = parent {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(dir.to_path_buf());
            parent = dir.parent();
        }
    }

    fn make_note(&self, relative: &Path, at: DateTime<Utc>) -> NoteFile {
        NoteFile {
            path: self.root.join(relative),
            relative: relative.to_path_buf(),
            name: to_dotted_name(relative),
            size: 0,
            created: at,
            accessed: at,
            modified: at,
        }
    }

    /// Inserts a note with explicit metadata, replacing any existing one.
    pub fn insert(&mut self, mut note: NoteFile) {
        note.path = self.root.join(&note.relative);
        note.name = to_dotted_name(&note.relative);
        let relative = note.relative.clone();
        self.add_parents(&relative);
        self.notes.insert(relative, note);
    }

    pub fn contains_dir(&self, relative: &Path) -> bool {
        self.dirs.contains(relative)
    }
}

impl NoteStore for InMemoryStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn list_notes(&self) -> Result<Vec<NoteFile>> {
        Ok(self.notes.values().cloned().collect())
    }

    fn note(&self, relative: &Path) -> Result<Option<NoteFile>> {
        Ok(self.notes.get(relative).cloned())
    }

    fn create_note(&mut self, relative: &Path) -> Result<NoteFile> {
        if self.notes.contains_key(relative) {
            return Err(NoteError::AlreadyExists(to_dotted_name(relative)));
        }
        let at = self.tick();
        let note = self.make_note(relative, at);
        self.add_parents(relative);
        self.notes.insert(relative.to_path_buf(), note.clone());
        Ok(note)
    }

    fn remove_note(&mut self, relative: &Path) -> Result<()> {
        self.notes
            .remove(relative)
            .map(|_| ())
            .ok_or_else(|| NoteError::NotFound(to_dotted_name(relative)))
    }

    fn move_note(&mut self, from: &Path, to: &Path) -> Result<NoteFile> {
        if self.notes.contains_key(to) {
            return Err(NoteError::AlreadyExists(to_dotted_name(to)));
        }
        let old = self
            .notes
            .remove(from)
            .ok_or_else(|| NoteError::NotFound(to_dotted_name(from)))?;
        let at = self.tick();
        let mut moved = self.make_note(to, old.created);
        moved.size = old.size;
        moved.accessed = at;
        moved.modified = old.modified;
        self.add_parents(to);
        self.notes.insert(to.to_path_buf(), moved.clone());
        Ok(moved)
    }

    fn prune_empty_dirs(&mut self) -> Result<Vec<PathBuf>> {
        let mut dirs: Vec<PathBuf> = self.dirs.iter().cloned().collect();
        dirs.sort_by_key(|d| std::cmp::Reverse(d.components().count()));

        let mut removed = Vec::new();
        for dir in dirs {
            let occupied = self.notes.keys().any(|p| p.starts_with(&dir))
                || self.dirs.iter().any(|d| d != &dir && d.starts_with(&dir));
            if !occupied {
                self.dirs.remove(&dir);
                removed.push(dir);
            }
        }
        Ok(removed)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::names::to_relative_path;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds notes by dotted name, in order.
        pub fn with_notes(mut self, names: &[&str]) -> Self {
            for name in names {
                let rel = to_relative_path(name).unwrap();
                self.store.create_note(&rel).unwrap();
            }
            self
        }

        /// Adds `count` notes named `{prefix}{i}.md`, zero-padded so name order is numeric.
        pub fn with_numbered_notes(mut self, prefix: &str, count: usize) -> Self {
            for i in 1..=count {
                let rel = to_relative_path(&format!("{}{:02}.md", prefix, i)).unwrap();
                self.store.create_note(&rel).unwrap();
            }
            self
        }

        pub fn with_sized_note(mut self, name: &str, size: u64) -> Self {
            let rel = to_relative_path(name).unwrap();
            let mut note = self.store.create_note(&rel).unwrap();
            note.size = size;
            self.store.insert(note);
            self
        }
    }
}
