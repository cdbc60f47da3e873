use crate::cache::NoteRef;
use crate::error::{NoteError, Result};
use crate::model::{NoteFile, NoteType, SearchQuery, NOTE_TYPES};
use crate::names::has_known_extension;
use crate::pager::present;
use crate::resolver::{exact_match, resolve, Resolved};
use crate::session::Session;
use crate::store::NoteStore;
use tracing::debug;

/// The cached entry for `/ordinal`, re-checked against the store.
pub fn cached_note<S: NoteStore>(session: &Session<S>, ordinal: usize) -> Result<NoteFile> {
    let cached = session.cache.get(ordinal)?;
    session
        .store
        .note(&cached.relative)?
        .ok_or_else(|| NoteError::NotFound(cached.name.clone()))
}

/// A note addressed directly: by cache reference, or by exact name.
///
/// A name without extension and without a type tries each registered type in
/// order.
pub fn direct_note<S: NoteStore>(
    session: &Session<S>,
    target: &NoteRef,
    note_type: Option<&NoteType>,
) -> Result<NoteFile> {
    let name = match target {
        NoteRef::Selection(ordinal) => return cached_note(session, *ordinal),
        NoteRef::Name(name) => name,
    };

    if note_type.is_some() || has_known_extension(name) {
        return exact_match(&session.store, name, note_type)?
            .ok_or_else(|| NoteError::NotFound(name.clone()));
    }
    for t in NOTE_TYPES {
        if let Some(note) = exact_match(&session.store, name, Some(t))? {
            return Ok(note);
        }
    }
    Err(NoteError::NotFound(name.clone()))
}

/// Picks exactly one note for open, path and delete.
///
/// Cache references are taken as-is. Names go through the resolver; several
/// matches are listed and the user picks one by number. `Ok(None)` means the
/// user backed out.
pub fn select_note<S: NoteStore>(
    session: &mut Session<S>,
    target: &NoteRef,
    filter: &SearchQuery,
) -> Result<Option<NoteFile>> {
    let name = match target {
        NoteRef::Selection(ordinal) => return cached_note(session, *ordinal).map(Some),
        NoteRef::Name(name) => name,
    };

    let query = SearchQuery::new(name.as_str())
        .with_type(filter.note_type)
        .sorted_by(filter.sort_key, filter.reverse);

    match resolve(&session.store, session.finder.as_mut(), &query)? {
        Resolved::Exact(note) | Resolved::Chosen(note) => Ok(Some(note)),
        Resolved::Matches(mut notes) if notes.len() == 1 => Ok(notes.pop()),
        Resolved::Matches(notes) => {
            let mut shown = present(notes, session.prompter.as_mut(), &mut session.cache)?;
            let choice = session.prompter.read_ordinal_choice(shown.len())?;
            debug!(?choice, "ordinal choice");
            Ok(choice
                .filter(|c| (1..=shown.len()).contains(c))
                .map(|c| shown.swap_remove(c - 1)))
        }
        Resolved::Cancelled => Ok(None),
        Resolved::Empty => Err(NoteError::NotFound(name.clone())),
    }
}
