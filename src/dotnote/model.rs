use crate::error::NoteError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;
use std::str::FromStr;

/// A recognized note format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteType {
    pub name: &'static str,
    pub alias: &'static str,
    pub extension: &'static str,
}

/// Known note types. Extensions are unique across the table.
pub static NOTE_TYPES: &[NoteType] = &[
    NoteType {
        name: "markdown",
        alias: "md",
        extension: "md",
    },
    NoteType {
        name: "notebook",
        alias: "nb",
        extension: "ipynb",
    },
    NoteType {
        name: "latex",
        alias: "tex",
        extension: "tex",
    },
    NoteType {
        name: "mermaid",
        alias: "mmd",
        extension: "mmd",
    },
];

impl NoteType {
    /// Looks up a type by its exact name or alias.
    pub fn lookup(name: &str) -> Option<&'static NoteType> {
        NOTE_TYPES
            .iter()
            .find(|t| t.name == name || t.alias == name)
    }

    pub fn from_extension(ext: &str) -> Option<&'static NoteType> {
        NOTE_TYPES.iter().find(|t| t.extension == ext)
    }
}

impl std::fmt::Display for NoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A note file found under the notes root.
///
/// Only the reference and its filesystem metadata are kept, never the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFile {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Path relative to the notes root.
    pub relative: PathBuf,
    /// Dotted display name, e.g. `project.meeting.md`.
    pub name: String,
    pub size: u64,
    pub created: DateTime<Utc>,
    pub accessed: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl NoteFile {
    pub fn extension(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(_, ext)| ext)
    }
}

/// Field used to order result listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Path,
    Size,
    Created,
    Accessed,
    Modified,
}

impl SortKey {
    /// Recency keys list most-recent-first unless reversed.
    pub fn is_recency(&self) -> bool {
        matches!(self, SortKey::Created | SortKey::Accessed | SortKey::Modified)
    }

    pub fn compare(&self, a: &NoteFile, b: &NoteFile) -> Ordering {
        let primary = match self {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Path => a.relative.cmp(&b.relative),
            SortKey::Size => a.size.cmp(&b.size),
            SortKey::Created => a.created.cmp(&b.created),
            SortKey::Accessed => a.accessed.cmp(&b.accessed),
            SortKey::Modified => a.modified.cmp(&b.modified),
        };
        primary.then_with(|| a.name.cmp(&b.name))
    }
}

impl FromStr for SortKey {
    type Err = NoteError;

    /// Accepts short names and the long timestamp spellings, in local or UTC form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        let key = match normalized.as_str() {
            "name" => SortKey::Name,
            "path" | "fullname" => SortKey::Path,
            "size" | "length" => SortKey::Size,
            "created" | "creationtime" | "createdutc" | "creationtimeutc" => SortKey::Created,
            "accessed" | "lastaccesstime" | "accessedutc" | "lastaccesstimeutc" => {
                SortKey::Accessed
            }
            "modified" | "lastwritetime" | "modifiedutc" | "lastwritetimeutc" => {
                SortKey::Modified
            }
            _ => return Err(NoteError::InvalidSortKey(s.to_string())),
        };
        Ok(key)
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SortKey::Name => "name",
            SortKey::Path => "path",
            SortKey::Size => "size",
            SortKey::Created => "created",
            SortKey::Accessed => "accessed",
            SortKey::Modified => "modified",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub pattern: String,
    pub note_type: Option<&'static NoteType>,
    pub sort_key: SortKey,
    /// Flips the sort key's default direction.
    pub reverse: bool,
}

impl SearchQuery {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, note_type: Option<&'static NoteType>) -> Self {
        self.note_type = note_type;
        self
    }

    pub fn sorted_by(mut self, key: SortKey, reverse: bool) -> Self {
        self.sort_key = key;
        self.reverse = reverse;
        self
    }

    pub fn descending(&self) -> bool {
        self.sort_key.is_recency() != self.reverse
    }

    pub fn sort(&self, notes: &mut [NoteFile]) {
        let key = self.sort_key;
        if self.descending() {
            notes.sort_by(|a, b| key.compare(b, a));
        } else {
            notes.sort_by(|a, b| key.compare(a, b));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn extensions_are_unique() {
        let exts: HashSet<_> = NOTE_TYPES.iter().map(|t| t.extension).collect();
        assert_eq!(exts.len(), NOTE_TYPES.len());
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(NoteType::lookup("markdown").unwrap().extension, "md");
        assert_eq!(NoteType::lookup("nb").unwrap().extension, "ipynb");
        assert!(NoteType::lookup("Markdown").is_none());
        assert!(NoteType::lookup("mark").is_none());
    }

    #[test]
    fn parses_long_sort_key_spellings() {
        assert_eq!("LastWriteTime".parse::<SortKey>().unwrap(), SortKey::Modified);
        assert_eq!("creation-time-utc".parse::<SortKey>().unwrap(), SortKey::Created);
        assert_eq!("accessed".parse::<SortKey>().unwrap(), SortKey::Accessed);
        assert!(matches!(
            "colour".parse::<SortKey>(),
            Err(NoteError::InvalidSortKey(_))
        ));
    }

    #[test]
    fn recency_keys_default_descending() {
        let q = SearchQuery::new("x").sorted_by(SortKey::Modified, false);
        assert!(q.descending());
        let q = SearchQuery::new("x").sorted_by(SortKey::Modified, true);
        assert!(!q.descending());
        let q = SearchQuery::new("x").sorted_by(SortKey::Name, false);
        assert!(!q.descending());
        let q = SearchQuery::new("x").sorted_by(SortKey::Size, true);
        assert!(q.descending());
    }
}
