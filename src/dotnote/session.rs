use crate::cache::SelectionCache;
use crate::editor::Opener;
use crate::finder::FuzzyFinder;
use crate::prompt::Prompter;
use crate::searcher::ContentSearcher;
use crate::store::NoteStore;

/// Everything a command needs: the note store, the selection cache left by
/// the previous listing, and the interactive collaborators.
pub struct Session<S: NoteStore> {
    pub store: S,
    pub cache: SelectionCache,
    pub prompter: Box<dyn Prompter>,
    pub opener: Box<dyn Opener>,
    pub finder: Box<dyn FuzzyFinder>,
    pub searcher: Box<dyn ContentSearcher>,
}

impl<S: NoteStore> Session<S> {
    pub fn new(
        store: S,
        prompter: Box<dyn Prompter>,
        opener: Box<dyn Opener>,
        finder: Box<dyn FuzzyFinder>,
        searcher: Box<dyn ContentSearcher>,
    ) -> Self {
        Self {
            store,
            cache: SelectionCache::new(),
            prompter,
            opener,
            finder,
            searcher,
        }
    }

    pub fn with_cache(mut self, cache: SelectionCache) -> Self {
        self.cache = cache;
        self
    }
}
