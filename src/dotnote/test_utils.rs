//! Scripted collaborators for tests.
//!
//! Each double keeps its state behind an `Rc<RefCell<_>>` so a test can hand a
//! clone to a [`Session`] and still inspect what happened afterwards.

use crate::editor::Opener;
use crate::error::Result;
use crate::finder::FuzzyFinder;
use crate::model::NoteFile;
use crate::prompt::{Page, PageKey, Prompter};
use crate::searcher::{ContentMatch, ContentSearcher};
use crate::session::Session;
use crate::store::memory::InMemoryStore;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Default)]
struct PrompterState {
    page_keys: VecDeque<PageKey>,
    choices: VecDeque<Option<usize>>,
    confirmations: VecDeque<bool>,
    pages_shown: Vec<Page>,
    questions: Vec<String>,
}

/// Replays scripted answers. When a script runs out it stops, backs out, or declines.
#[derive(Clone, Default)]
pub struct ScriptedPrompter {
    state: Rc<RefCell<PrompterState>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_keys(self, keys: &[PageKey]) -> Self {
        self.state.borrow_mut().page_keys.extend(keys.iter().copied());
        self
    }

    pub fn with_choice(self, choice: Option<usize>) -> Self {
        self.state.borrow_mut().choices.push_back(choice);
        self
    }

    pub fn with_confirmation(self, answer: bool) -> Self {
        self.state.borrow_mut().confirmations.push_back(answer);
        self
    }

    /// Page numbers in the order they were displayed.
    pub fn pages_shown(&self) -> Vec<usize> {
        self.state
            .borrow()
            .pages_shown
            .iter()
            .map(|p| p.number)
            .collect()
    }

    pub fn last_page(&self) -> Option<Page> {
        self.state.borrow().pages_shown.last().cloned()
    }

    pub fn questions(&self) -> Vec<String> {
        self.state.borrow().questions.clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn show_page(&mut self, page: &Page) -> Result<()> {
        self.state.borrow_mut().pages_shown.push(page.clone());
        Ok(())
    }

    fn read_page_key(&mut self) -> Result<PageKey> {
        Ok(self
            .state
            .borrow_mut()
            .page_keys
            .pop_front()
            .unwrap_or(PageKey::Stop))
    }

    fn read_ordinal_choice(&mut self, max: usize) -> Result<Option<usize>> {
        let choice = self.state.borrow_mut().choices.pop_front().flatten();
        Ok(choice.filter(|c| (1..=max).contains(c)))
    }

    fn read_confirmation(&mut self, question: &str) -> Result<bool> {
        let mut state = self.state.borrow_mut();
        state.questions.push(question.to_string());
        Ok(state.confirmations.pop_front().unwrap_or(false))
    }
}

#[derive(Default)]
struct FinderState {
    response: Option<PathBuf>,
    calls: usize,
    last_query: Option<String>,
    last_candidates: usize,
}

/// Always answers with the same path (or cancels with `None`).
#[derive(Clone, Default)]
pub struct ScriptedFinder {
    state: Rc<RefCell<FinderState>>,
}

impl ScriptedFinder {
    pub fn new(response: Option<PathBuf>) -> Self {
        let finder = Self::default();
        finder.state.borrow_mut().response = response;
        finder
    }

    pub fn calls(&self) -> usize {
        self.state.borrow().calls
    }

    pub fn last_query(&self) -> Option<String> {
        self.state.borrow().last_query.clone()
    }

    pub fn last_candidates(&self) -> usize {
        self.state.borrow().last_candidates
    }
}

impl FuzzyFinder for ScriptedFinder {
    fn choose(&mut self, candidates: &[NoteFile], query: &str) -> Result<Option<PathBuf>> {
        let mut state = self.state.borrow_mut();
        state.calls += 1;
        state.last_query = Some(query.to_string());
        state.last_candidates = candidates.len();
        Ok(state.response.clone())
    }
}

/// Records every path handed to it.
#[derive(Clone, Default)]
pub struct RecordingOpener {
    opened: Rc<RefCell<Vec<PathBuf>>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.borrow().clone()
    }
}

impl Opener for RecordingOpener {
    fn open(&mut self, path: &Path) -> Result<()> {
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

/// Returns fixed hits regardless of the query.
#[derive(Clone, Default)]
pub struct StaticSearcher {
    hits: Vec<ContentMatch>,
    queries: Rc<RefCell<Vec<String>>>,
}

impl StaticSearcher {
    pub fn new(hits: Vec<ContentMatch>) -> Self {
        Self {
            hits,
            queries: Rc::default(),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl ContentSearcher for StaticSearcher {
    fn search(&mut self, query: &str, _root: &Path) -> Result<Vec<ContentMatch>> {
        self.queries.borrow_mut().push(query.to_string());
        Ok(self.hits.clone())
    }
}

/// A session over an in-memory store, with handles to every double.
pub struct TestSession {
    pub session: Session<InMemoryStore>,
    pub prompter: ScriptedPrompter,
    pub finder: ScriptedFinder,
    pub opener: RecordingOpener,
    pub searcher: StaticSearcher,
}

impl TestSession {
    pub fn new(store: InMemoryStore) -> Self {
        Self::build(
            store,
            ScriptedPrompter::new(),
            ScriptedFinder::new(None),
            StaticSearcher::default(),
        )
    }

    pub fn build(
        store: InMemoryStore,
        prompter: ScriptedPrompter,
        finder: ScriptedFinder,
        searcher: StaticSearcher,
    ) -> Self {
        let opener = RecordingOpener::default();
        let session = Session::new(
            store,
            Box::new(prompter.clone()),
            Box::new(opener.clone()),
            Box::new(finder.clone()),
            Box::new(searcher.clone()),
        );
        Self {
            session,
            prompter,
            finder,
            opener,
            searcher,
        }
    }
}
