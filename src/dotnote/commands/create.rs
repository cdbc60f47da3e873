use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NoteError, Result};
use crate::model::NoteType;
use crate::names::{is_valid_name, resolve_type_suffix, to_relative_path};
use crate::session::Session;
use crate::store::NoteStore;
use tracing::info;

/// Creates an empty note (and any missing parent directories), then hands it
/// to the opener unless `open` is false.
pub fn run<S: NoteStore>(
    session: &mut Session<S>,
    name: &str,
    note_type: Option<&NoteType>,
    open: bool,
) -> Result<CmdResult> {
    if !is_valid_name(name) {
        return Err(NoteError::InvalidName(name.to_string()));
    }
    let full_name = resolve_type_suffix(name, note_type)?;
    let relative = to_relative_path(&full_name)?;

    if session.store.note(&relative)?.is_some() {
        return Err(NoteError::AlreadyExists(full_name));
    }

    let note = session.store.create_note(&relative)?;
    info!(name = %note.name, path = %note.path.display(), "created note");

    if open {
        session.opener.open(&note.path)?;
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Created {}", note.name)));
    Ok(result.with_affected_notes(vec![note]))
}
