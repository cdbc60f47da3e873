use crate::error::Result;
use crate::model::NoteFile;

/// One screen of a numbered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub total: usize,
    pub entries: Vec<NoteFile>,
}

impl Page {
    pub fn is_paginated(&self) -> bool {
        self.total > 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKey {
    Next,
    Previous,
    Stop,
}

/// Interactive capability used by the resolver and the destructive commands.
///
/// The console implementation renders pages and reads single keystrokes; tests
/// use a scripted double.
pub trait Prompter {
    /// Displays a page of results.
    fn show_page(&mut self, page: &Page) -> Result<()>;

    /// Waits for a navigation key while a paginated listing is on screen.
    fn read_page_key(&mut self) -> Result<PageKey>;

    /// Reads a single 1..=max choice. `None` means the user backed out.
    fn read_ordinal_choice(&mut self, max: usize) -> Result<Option<usize>>;

    /// Asks a yes/no question; only an explicit yes confirms.
    fn read_confirmation(&mut self, question: &str) -> Result<bool>;
}
