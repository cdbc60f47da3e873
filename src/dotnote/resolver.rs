//! # Note Resolution
//!
//! Turns a partial or ambiguous identifier into notes. Stages are tried in
//! order and the first one that produces anything wins:
//!
//! 1. **Exact path**: the identifier (plus the type filter's extension, if it
//!    has none) maps to a file that exists.
//! 2. **Pattern scan**: every note under the root whose display name or
//!    truncated path contains the identifier, with `*` matching any
//!    non-whitespace run. Case-insensitive. Results are sorted.
//! 3. **Fuzzy fallback**: the candidates and the raw identifier go to the
//!    [`FuzzyFinder`], which returns at most one note.
//!
//! An empty identifier skips straight to stage 3.

use crate::error::{NoteError, Result};
use crate::finder::FuzzyFinder;
use crate::model::{NoteFile, NoteType, SearchQuery};
use crate::names::{has_known_extension, is_valid_name, to_relative_path};
use crate::store::NoteStore;
use regex::{Regex, RegexBuilder};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Stage 1 found the canonical file.
    Exact(NoteFile),
    /// Stage 2 matches, sorted.
    Matches(Vec<NoteFile>),
    /// Stage 3 pick.
    Chosen(NoteFile),
    /// The finder was closed without a choice.
    Cancelled,
    /// There was nothing to choose from.
    Empty,
}

impl Resolved {
    pub fn into_notes(self) -> Vec<NoteFile> {
        match self {
            Resolved::Exact(n) | Resolved::Chosen(n) => vec![n],
            Resolved::Matches(notes) => notes,
            Resolved::Cancelled | Resolved::Empty => Vec::new(),
        }
    }
}

pub fn resolve<S: NoteStore>(
    store: &S,
    finder: &mut dyn FuzzyFinder,
    query: &SearchQuery,
) -> Result<Resolved> {
    let pattern = query.pattern.trim();

    if !pattern.is_empty() {
        if let Some(note) = exact_match(store, pattern, query.note_type)? {
            debug!(name = %note.name, "resolved exact path");
            return Ok(Resolved::Exact(note));
        }

        let matches = matching_notes(store, query)?;
        debug!(pattern, count = matches.len(), "pattern scan");
        if !matches.is_empty() {
            return Ok(Resolved::Matches(matches));
        }
    }

    let mut candidates = candidates(store, query.note_type)?;
    if candidates.is_empty() {
        return Ok(Resolved::Empty);
    }
    query.sort(&mut candidates);

    debug!(count = candidates.len(), "falling back to fuzzy finder");
    let Some(chosen) = finder.choose(&candidates, pattern)? else {
        return Ok(Resolved::Cancelled);
    };

    if let Some(note) = candidates.into_iter().find(|n| n.path == chosen) {
        return Ok(Resolved::Chosen(note));
    }
    store
        .note_at(&chosen)?
        .map(Resolved::Chosen)
        .ok_or_else(|| NoteError::NotFound(chosen.display().to_string()))
}

/// Stage 1. Identifiers that are not valid names simply do not match.
pub fn exact_match<S: NoteStore>(
    store: &S,
    identifier: &str,
    note_type: Option<&NoteType>,
) -> Result<Option<NoteFile>> {
    let name = if has_known_extension(identifier) {
        identifier.to_string()
    } else if let Some(t) = note_type {
        format!("{}.{}", identifier, t.extension)
    } else {
        return Ok(None);
    };

    if !is_valid_name(&name) {
        return Ok(None);
    }
    store.note(&to_relative_path(&name)?)
}

/// Escapes the identifier and turns `*` into a non-whitespace wildcard.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\S*");
    Ok(RegexBuilder::new(&body).case_insensitive(true).build()?)
}

/// Stage 2.
pub fn matching_notes<S: NoteStore>(store: &S, query: &SearchQuery) -> Result<Vec<NoteFile>> {
    let regex = compile_pattern(query.pattern.trim())?;
    let mut matches: Vec<NoteFile> = candidates(store, query.note_type)?
        .into_iter()
        .filter(|note| {
            let truncated = note.relative.to_string_lossy().replace('\\', "/");
            regex.is_match(&note.name) || regex.is_match(&truncated)
        })
        .collect();
    query.sort(&mut matches);
    Ok(matches)
}

/// All notes, restricted to one type when a filter is set.
fn candidates<S: NoteStore>(store: &S, note_type: Option<&NoteType>) -> Result<Vec<NoteFile>> {
    let notes = store.list_notes()?;
    Ok(match note_type {
        Some(t) => notes
            .into_iter()
            .filter(|n| n.extension() == Some(t.extension))
            .collect(),
        None => notes,
    })
}
