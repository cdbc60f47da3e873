//! # Selection Cache
//!
//! Every listing the user sees is numbered `[1]..[9]`, and those numbers can be
//! used in the next command as `/N` (e.g. `dotnote delete /3`). The cache holds
//! exactly the entries of the page that was on screen last, replaced wholesale
//! each time a listing is shown.
//!
//! The cache itself lives in memory; hosts that run one command per process
//! persist it with [`SelectionCache::save`] and [`SelectionCache::load`].

use crate::error::{NoteError, Result};
use crate::model::NoteFile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

const CACHE_FILENAME: &str = "selection.json";

/// Upper bound on entries shown per page, and so on cached entries.
pub const PAGE_SIZE: usize = 9;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionCache {
    /// `None` until the first listing of the session.
    entries: Option<Vec<NoteFile>>,
}

impl SelectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, entries: Vec<NoteFile>) {
        let mut entries = entries;
        entries.truncate(PAGE_SIZE);
        self.entries = Some(entries);
    }

    /// 1-based lookup.
    pub fn get(&self, ordinal: usize) -> Result<&NoteFile> {
        let entries = self.entries.as_ref().ok_or(NoteError::EmptyCache)?;
        if ordinal == 0 || ordinal > entries.len() {
            return Err(NoteError::OutOfRange {
                ordinal,
                len: entries.len(),
            });
        }
        Ok(&entries[ordinal - 1])
    }

    pub fn entries(&self) -> &[NoteFile] {
        self.entries.as_deref().unwrap_or_default()
    }

    pub fn is_populated(&self) -> bool {
        self.entries.is_some()
    }

    /// Loads a persisted cache, or an unpopulated one if missing or unreadable.
    pub fn load<P: AsRef<Path>>(state_dir: P) -> Self {
        let path = state_dir.as_ref().join(CACHE_FILENAME);
        let Ok(content) = fs::read_to_string(&path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring unreadable selection cache");
            Self::default()
        })
    }

    pub fn save<P: AsRef<Path>>(&self, state_dir: P) -> Result<()> {
        let state_dir = state_dir.as_ref();
        if !state_dir.exists() {
            fs::create_dir_all(state_dir).map_err(NoteError::Io)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(NoteError::Serialization)?;
        fs::write(state_dir.join(CACHE_FILENAME), content).map_err(NoteError::Io)?;
        Ok(())
    }
}

/// True when `input` uses the `/N` selection syntax (length > 1, leading `/`).
pub fn is_selection_reference(input: &str) -> bool {
    input.len() > 1 && input.starts_with('/')
}

/// How the user pointed at a note: by a previous listing's number or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteRef {
    Selection(usize),
    Name(String),
}

impl NoteRef {
    pub fn parse(input: &str) -> Result<Self> {
        if !is_selection_reference(input) {
            return Ok(NoteRef::Name(input.to_string()));
        }
        let digits = &input[1..];
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(NoteError::MalformedReference(input.to_string()));
        }
        digits
            .parse()
            .map(NoteRef::Selection)
            .map_err(|_| NoteError::MalformedReference(input.to_string()))
    }
}

impl std::fmt::Display for NoteRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteRef::Selection(n) => write!(f, "/{}", n),
            NoteRef::Name(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::NoteStore;

    fn notes(n: usize) -> Vec<NoteFile> {
        StoreFixture::new()
            .with_numbered_notes("n", n)
            .store
            .list_notes()
            .unwrap()
    }

    #[test]
    fn unpopulated_cache_is_distinct_from_empty() {
        let mut cache = SelectionCache::new();
        assert!(matches!(cache.get(1), Err(NoteError::EmptyCache)));

        cache.put(Vec::new());
        assert!(matches!(
            cache.get(1),
            Err(NoteError::OutOfRange { ordinal: 1, len: 0 })
        ));
    }

    #[test]
    fn get_is_one_based_and_bounded() {
        let mut cache = SelectionCache::new();
        cache.put(notes(3));

        assert_eq!(cache.get(1).unwrap().name, "n01.md");
        assert_eq!(cache.get(3).unwrap().name, "n03.md");
        assert!(matches!(cache.get(0), Err(NoteError::OutOfRange { .. })));
        assert!(matches!(cache.get(4), Err(NoteError::OutOfRange { .. })));
    }

    #[test]
    fn put_replaces_rather_than_merges() {
        let mut cache = SelectionCache::new();
        cache.put(notes(5));
        cache.put(notes(2));
        assert_eq!(cache.entries().len(), 2);
    }

    #[test]
    fn parses_references() {
        assert_eq!(NoteRef::parse("/3").unwrap(), NoteRef::Selection(3));
        assert_eq!(NoteRef::parse("/0").unwrap(), NoteRef::Selection(0));
        assert_eq!(
            NoteRef::parse("a.md").unwrap(),
            NoteRef::Name("a.md".into())
        );
        // A lone slash is too short to be a reference.
        assert_eq!(NoteRef::parse("/").unwrap(), NoteRef::Name("/".into()));
        assert!(matches!(
            NoteRef::parse("/x2"),
            Err(NoteError::MalformedReference(_))
        ));
        assert!(matches!(
            NoteRef::parse("/-1"),
            Err(NoteError::MalformedReference(_))
        ));
    }

    #[test]
    fn survives_save_and_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut cache = SelectionCache::new();
        cache.put(notes(2));
        cache.save(temp.path()).unwrap();

        let loaded = SelectionCache::load(temp.path());
        assert_eq!(loaded, cache);
    }

    #[test]
    fn load_missing_is_unpopulated() {
        let temp = tempfile::TempDir::new().unwrap();
        let loaded = SelectionCache::load(temp.path().join("nope"));
        assert!(!loaded.is_populated());
    }
}
