use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NoteError, Result};
use crate::model::{NoteFile, SearchQuery};
use crate::session::Session;
use crate::store::NoteStore;
use std::collections::HashSet;
use tracing::{debug, info};

/// Full-text search. Hits are collapsed to distinct notes in hit order and
/// handed to the finder; the chosen note is opened. An empty query offers
/// the whole tree.
pub fn run<S: NoteStore>(session: &mut Session<S>, query: &str) -> Result<CmdResult> {
    let query = query.trim();
    let mut result = CmdResult::default();

    let candidates = if query.is_empty() {
        let mut all = session.store.list_notes()?;
        SearchQuery::default().sort(&mut all);
        all
    } else {
        let root = session.store.root().to_path_buf();
        let hits = session.searcher.search(query, &root)?;
        debug!(query, hits = hits.len(), "content search");

        let mut seen = HashSet::new();
        let mut notes: Vec<NoteFile> = Vec::new();
        for hit in hits {
            if !seen.insert(hit.path.clone()) {
                continue;
            }
            if let Some(note) = session.store.note_at(&hit.path)? {
                notes.push(note);
            }
        }
        notes
    };

    if candidates.is_empty() {
        let message = if query.is_empty() {
            "No notes found".to_string()
        } else {
            format!("No notes contain '{}'", query)
        };
        result.add_message(CmdMessage::info(message));
        return Ok(result);
    }

    let Some(chosen) = session.finder.choose(&candidates, query)? else {
        return Ok(result);
    };
    let note = candidates
        .into_iter()
        .find(|n| n.path == chosen)
        .ok_or_else(|| NoteError::NotFound(chosen.display().to_string()))?;

    info!(name = %note.name, "opening search result");
    session.opener.open(&note.path)?;
    Ok(result.with_affected_notes(vec![note]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::searcher::ContentMatch;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::test_utils::{ScriptedFinder, ScriptedPrompter, StaticSearcher, TestSession};
    use std::path::PathBuf;

    fn hit(path: &str, line: usize) -> ContentMatch {
        ContentMatch {
            path: PathBuf::from(path),
            line,
            column: 1,
            text: "budget".to_string(),
        }
    }

    fn session(finder: ScriptedFinder, hits: Vec<ContentMatch>) -> TestSession {
        TestSession::build(
            StoreFixture::new()
                .with_notes(&["a.md", "b.c.md", "d.md"])
                .store,
            ScriptedPrompter::new(),
            finder,
            StaticSearcher::new(hits),
        )
    }

    #[test]
    fn hits_collapse_to_notes_and_the_pick_is_opened() {
        let finder = ScriptedFinder::new(Some(PathBuf::from("/notes/b/c.md")));
        let hits = vec![
            hit("/notes/b/c.md", 3),
            hit("/notes/a.md", 1),
            hit("/notes/b/c.md", 9),
            hit("/elsewhere/x.md", 1),
        ];
        let mut t = session(finder, hits);
        let result = run(&mut t.session, "budget").unwrap();

        assert_eq!(result.affected_notes[0].name, "b.c.md");
        assert_eq!(t.opener.opened(), vec![PathBuf::from("/notes/b/c.md")]);
        assert_eq!(t.searcher.queries(), vec!["budget"]);
        assert_eq!(t.finder.last_candidates(), 2);
        assert_eq!(t.finder.last_query().as_deref(), Some("budget"));
    }

    #[test]
    fn no_hits_is_informational() {
        let mut t = session(ScriptedFinder::new(None), Vec::new());
        let result = run(&mut t.session, "nothing").unwrap();

        assert_eq!(result.messages[0].content, "No notes contain 'nothing'");
        assert_eq!(t.finder.calls(), 0);
    }

    #[test]
    fn empty_query_offers_every_note() {
        let mut t = session(ScriptedFinder::new(None), Vec::new());
        let result = run(&mut t.session, "").unwrap();

        assert!(result.affected_notes.is_empty());
        assert!(t.searcher.queries().is_empty());
        assert_eq!(t.finder.last_candidates(), 3);
        assert!(t.opener.opened().is_empty());
    }
}
