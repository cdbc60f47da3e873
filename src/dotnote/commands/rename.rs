use crate::cache::NoteRef;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NoteError, Result};
use crate::model::NoteType;
use crate::names::{has_known_extension, is_valid_name, to_relative_path};
use crate::session::Session;
use crate::store::NoteStore;
use tracing::info;

use super::helpers::direct_note;

/// Moves a note to `new_name`. The source must be addressed directly (cache
/// reference or exact name); the destination must not exist.
///
/// A destination without extension takes `note_type`'s, or else the source's.
pub fn run<S: NoteStore>(
    session: &mut Session<S>,
    current: &NoteRef,
    new_name: &str,
    note_type: Option<&NoteType>,
) -> Result<CmdResult> {
    if !is_valid_name(new_name) {
        return Err(NoteError::InvalidName(new_name.to_string()));
    }
    let source = direct_note(session, current, note_type)?;

    let destination_name = if has_known_extension(new_name) {
        new_name.to_string()
    } else {
        let ext = note_type
            .map(|t| t.extension)
            .or_else(|| source.extension())
            .ok_or_else(|| NoteError::MissingType(new_name.to_string()))?;
        format!("{}.{}", new_name, ext)
    };
    let destination = to_relative_path(&destination_name)?;

    if session.store.note(&destination)?.is_some() {
        return Err(NoteError::AlreadyExists(destination_name));
    }

    let moved = session.store.move_note(&source.relative, &destination)?;
    info!(from = %source.name, to = %moved.name, "renamed note");
    session.store.prune_empty_dirs()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Renamed {} to {}",
        source.name, moved.name
    )));
    Ok(result.with_affected_notes(vec![moved]))
}
