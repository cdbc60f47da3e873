use crate::cache::NoteRef;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::SearchQuery;
use crate::session::Session;
use crate::store::NoteStore;

use super::helpers::select_note;

/// Resolves like `open` but reports the absolute path instead.
pub fn run<S: NoteStore>(
    session: &mut Session<S>,
    target: &NoteRef,
    filter: &SearchQuery,
) -> Result<CmdResult> {
    let paths = select_note(session, target, filter)?
        .map(|note| vec![note.path])
        .unwrap_or_default();
    Ok(CmdResult::default().with_note_paths(paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::test_utils::TestSession;
    use std::path::PathBuf;

    #[test]
    fn reports_absolute_path() {
        let mut t = TestSession::new(
            StoreFixture::new()
                .with_notes(&["work.q3.plan.md"])
                .store,
        );
        let result = run(
            &mut t.session,
            &NoteRef::Name("q3".into()),
            &SearchQuery::default(),
        )
        .unwrap();

        assert_eq!(
            result.note_paths,
            vec![PathBuf::from("/notes/work/q3/plan.md")]
        );
        assert!(t.opener.opened().is_empty());
    }
}
