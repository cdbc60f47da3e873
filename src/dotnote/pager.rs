//! Paged presentation of result lists.
//!
//! Results are shown [`PAGE_SIZE`] at a time. With more than one page the user
//! moves forward and back until they stop; the page on screen at that moment
//! becomes the selection cache. The cache therefore only ever holds entries the
//! user actually saw.

use crate::cache::{SelectionCache, PAGE_SIZE};
use crate::error::Result;
use crate::model::NoteFile;
use crate::prompt::{Page, PageKey, Prompter};
use tracing::debug;

pub fn pages(notes: &[NoteFile]) -> Vec<Page> {
    let total = notes.len().div_ceil(PAGE_SIZE).max(1);
    notes
        .chunks(PAGE_SIZE)
        .enumerate()
        .map(|(i, chunk)| Page {
            number: i + 1,
            total,
            entries: chunk.to_vec(),
        })
        .collect()
}

/// Shows `notes`, lets the user page through them and caches the final page.
/// Returns the entries of that page.
pub fn present(
    notes: Vec<NoteFile>,
    prompter: &mut dyn Prompter,
    cache: &mut SelectionCache,
) -> Result<Vec<NoteFile>> {
    let mut pages = pages(&notes);
    if pages.is_empty() {
        return Ok(Vec::new());
    }

    let mut current = 0;
    prompter.show_page(&pages[current])?;
    if pages.len() > 1 {
        loop {
            let next = match prompter.read_page_key()? {
                PageKey::Next => (current + 1).min(pages.len() - 1),
                PageKey::Previous => current.saturating_sub(1),
                PageKey::Stop => break,
            };
            if next != current {
                current = next;
                prompter.show_page(&pages[current])?;
            }
        }
    }

    let page = pages.swap_remove(current);
    debug!(page = page.number, entries = page.entries.len(), "caching page");
    cache.put(page.entries.clone());
    Ok(page.entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::NoteStore;
    use crate::test_utils::ScriptedPrompter;

    fn notes(n: usize) -> Vec<NoteFile> {
        StoreFixture::new()
            .with_numbered_notes("n", n)
            .store
            .list_notes()
            .unwrap()
    }

    #[test]
    fn splits_into_pages_of_nine() {
        let pages = pages(&notes(10));
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].entries.len(), 9);
        assert_eq!(pages[1].entries.len(), 1);
        assert_eq!(pages[1].total, 2);
    }

    #[test]
    fn single_page_needs_no_keystroke() {
        let mut prompter = ScriptedPrompter::new();
        let mut cache = SelectionCache::new();
        let shown = present(notes(4), &mut prompter, &mut cache).unwrap();

        assert_eq!(shown.len(), 4);
        assert_eq!(prompter.pages_shown().len(), 1);
        assert_eq!(cache.entries().len(), 4);
    }

    #[test]
    fn caches_only_the_page_on_screen() {
        let mut prompter = ScriptedPrompter::new().with_page_keys(&[PageKey::Next, PageKey::Stop]);
        let mut cache = SelectionCache::new();
        let shown = present(notes(10), &mut prompter, &mut cache).unwrap();

        assert_eq!(shown.len(), 1);
        assert_eq!(cache.entries().len(), 1);
        assert_eq!(cache.get(1).unwrap().name, "n10.md");
        assert_eq!(prompter.pages_shown(), vec![1, 2]);
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut prompter = ScriptedPrompter::new().with_page_keys(&[
            PageKey::Previous,
            PageKey::Next,
            PageKey::Next,
            PageKey::Previous,
            PageKey::Stop,
        ]);
        let mut cache = SelectionCache::new();
        let shown = present(notes(12), &mut prompter, &mut cache).unwrap();

        assert_eq!(shown.len(), 9);
        assert_eq!(cache.get(1).unwrap().name, "n01.md");
        assert_eq!(prompter.pages_shown(), vec![1, 2, 1]);
    }

    #[test]
    fn empty_results_leave_cache_alone() {
        let mut prompter = ScriptedPrompter::new();
        let mut cache = SelectionCache::new();
        let shown = present(Vec::new(), &mut prompter, &mut cache).unwrap();
        assert!(shown.is_empty());
        assert!(!cache.is_populated());
    }
}
