use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SearchQuery;
use crate::pager::present;
use crate::resolver::{resolve, Resolved};
use crate::session::Session;
use crate::store::NoteStore;

/// Resolves `query` and shows the result as a numbered listing. The page left
/// on screen replaces the selection cache.
pub fn run<S: NoteStore>(session: &mut Session<S>, query: &SearchQuery) -> Result<CmdResult> {
    let resolved = resolve(&session.store, session.finder.as_mut(), query)?;
    let mut result = CmdResult::default();

    if resolved == Resolved::Empty {
        result.add_message(CmdMessage::info("No notes found"));
        return Ok(result);
    }

    let notes = resolved.into_notes();
    let shown = present(notes, session.prompter.as_mut(), &mut session.cache)?;
    Ok(result.with_listed_notes(shown))
}
