use crate::cache::NoteRef;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::SearchQuery;
use crate::session::Session;
use crate::store::NoteStore;
use tracing::info;

use super::helpers::select_note;

pub fn run<S: NoteStore>(
    session: &mut Session<S>,
    target: &NoteRef,
    filter: &SearchQuery,
) -> Result<CmdResult> {
    let Some(note) = select_note(session, target, filter)? else {
        return Ok(CmdResult::default());
    };

    info!(name = %note.name, "opening note");
    session.opener.open(&note.path)?;
    Ok(CmdResult::default().with_affected_notes(vec![note]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoteError;
    use crate::model::NoteType;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::test_utils::{ScriptedFinder, ScriptedPrompter, StaticSearcher, TestSession};
    use std::path::PathBuf;

    #[test]
    fn opens_exact_name() {
        let mut t = TestSession::new(StoreFixture::new().with_notes(&["a.b.md"]).store);
        run(&mut t.session, &NoteRef::Name("a.b.md".into()), &SearchQuery::default()).unwrap();
        assert_eq!(t.opener.opened(), vec![PathBuf::from("/notes/a/b.md")]);
    }

    #[test]
    fn type_filter_completes_the_name() {
        let mut t = TestSession::new(
            StoreFixture::new()
                .with_notes(&["diagram.mmd", "diagram.md"])
                .store,
        );
        let filter = SearchQuery::default().with_type(NoteType::lookup("mermaid"));
        run(&mut t.session, &NoteRef::Name("diagram".into()), &filter).unwrap();
        assert_eq!(t.opener.opened(), vec![PathBuf::from("/notes/diagram.mmd")]);
        assert!(t.prompter.pages_shown().is_empty());
    }

    #[test]
    fn opens_cached_selection() {
        let mut t = TestSession::new(StoreFixture::new().with_notes(&["a.md", "b.md"]).store);
        let notes = t.session.store.list_notes().unwrap();
        t.session.cache.put(notes);

        let result = run(&mut t.session, &NoteRef::Selection(1), &SearchQuery::default()).unwrap();
        assert_eq!(result.affected_notes[0].name, "a.md");
        assert_eq!(t.opener.opened(), vec![PathBuf::from("/notes/a.md")]);
    }

    #[test]
    fn backing_out_of_the_choice_opens_nothing() {
        let mut t = TestSession::build(
            StoreFixture::new().with_notes(&["x.a.md", "x.b.md"]).store,
            ScriptedPrompter::new().with_choice(None),
            ScriptedFinder::new(None),
            StaticSearcher::default(),
        );
        let result = run(&mut t.session, &NoteRef::Name("x".into()), &SearchQuery::default()).unwrap();
        assert!(result.affected_notes.is_empty());
        assert!(t.opener.opened().is_empty());
    }

    #[test]
    fn out_of_range_selection() {
        let mut t = TestSession::new(StoreFixture::new().with_notes(&["a.md"]).store);
        let notes = t.session.store.list_notes().unwrap();
        t.session.cache.put(notes);

        for ordinal in [0, 2] {
            let err = run(&mut t.session, &NoteRef::Selection(ordinal), &SearchQuery::default())
                .unwrap_err();
            assert!(matches!(err, NoteError::OutOfRange { len: 1, .. }));
        }
    }
}
