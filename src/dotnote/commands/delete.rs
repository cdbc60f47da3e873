use crate::cache::NoteRef;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SearchQuery;
use crate::session::Session;
use crate::store::NoteStore;
use tracing::{debug, info};

use super::helpers::select_note;

/// Removes one note, asking first unless `assume_yes`. Directories left empty
/// are pruned afterwards; the notes root is kept.
pub fn run<S: NoteStore>(
    session: &mut Session<S>,
    target: &NoteRef,
    filter: &SearchQuery,
    assume_yes: bool,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(note) = select_note(session, target, filter)? else {
        return Ok(result);
    };

    if !assume_yes {
        let question = format!("Delete {}? [y/N]", note.name);
        if !session.prompter.read_confirmation(&question)? {
            result.add_message(CmdMessage::warning(format!("{} not deleted", note.name)));
            return Ok(result);
        }
    }

    session.store.remove_note(&note.relative)?;
    info!(name = %note.name, "deleted note");

    let pruned = session.store.prune_empty_dirs()?;
    if !pruned.is_empty() {
        debug!(?pruned, "pruned empty directories");
    }

    result.add_message(CmdMessage::success(format!("Deleted {}", note.name)));
    Ok(result.with_affected_notes(vec![note]))
}
