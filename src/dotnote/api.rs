//! # API Facade
//!
//! The single entry point for dotnote operations, whatever the UI. It parses
//! the raw strings a user typed (type names, sort keys, `/N` references) into
//! typed values and dispatches to [`crate::commands`].
//!
//! No business logic lives here and nothing is printed.
//!
//! `NotesApi<S: NoteStore>` is generic over the store:
//! - Production: `NotesApi<FileStore>`
//! - Testing: `NotesApi<InMemoryStore>`

use crate::cache::{NoteRef, SelectionCache};
use crate::commands::{self, config::ConfigAction, CmdResult};
use crate::error::{NoteError, Result};
use crate::model::{NoteType, SearchQuery, SortKey};
use crate::session::Session;
use crate::store::NoteStore;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub struct NotesApi<S: NoteStore> {
    session: Session<S>,
    config_dir: PathBuf,
    default_type: Option<&'static NoteType>,
}

/// Parses an optional `--type` value.
pub fn parse_type(name: Option<&str>) -> Result<Option<&'static NoteType>> {
    match name {
        None => Ok(None),
        Some(name) => NoteType::lookup(name)
            .map(Some)
            .ok_or_else(|| NoteError::InvalidType(name.to_string())),
    }
}

/// Parses an optional `--sort-by` value; absent means by name.
pub fn parse_sort_key(key: Option<&str>) -> Result<SortKey> {
    key.map(SortKey::from_str).transpose().map(Option::unwrap_or_default)
}

fn build_filter(
    pattern: &str,
    type_name: Option<&str>,
    sort_by: Option<&str>,
    reverse: bool,
) -> Result<SearchQuery> {
    Ok(SearchQuery::new(pattern)
        .with_type(parse_type(type_name)?)
        .sorted_by(parse_sort_key(sort_by)?, reverse))
}

impl<S: NoteStore> NotesApi<S> {
    pub fn new(session: Session<S>, config_dir: PathBuf) -> Self {
        Self {
            session,
            config_dir,
            default_type: None,
        }
    }

    /// Type used by `create` when the name carries no extension and no type is given.
    pub fn with_default_type(mut self, default_type: Option<&'static NoteType>) -> Self {
        self.default_type = default_type;
        self
    }

    pub fn root(&self) -> &Path {
        self.session.store.root()
    }

    pub fn cache(&self) -> &SelectionCache {
        &self.session.cache
    }

    pub fn find(
        &mut self,
        pattern: &str,
        type_name: Option<&str>,
        sort_by: Option<&str>,
        reverse: bool,
    ) -> Result<CmdResult> {
        let query = build_filter(pattern, type_name, sort_by, reverse)?;
        commands::find::run(&mut self.session, &query)
    }

    pub fn create(&mut self, name: &str, type_name: Option<&str>, open: bool) -> Result<CmdResult> {
        let note_type = parse_type(type_name)?.or(self.default_type);
        commands::create::run(&mut self.session, name, note_type, open)
    }

    pub fn open(
        &mut self,
        target: &str,
        type_name: Option<&str>,
        sort_by: Option<&str>,
    ) -> Result<CmdResult> {
        let target = NoteRef::parse(target)?;
        let filter = build_filter("", type_name, sort_by, false)?;
        commands::open::run(&mut self.session, &target, &filter)
    }

    pub fn path(
        &mut self,
        target: &str,
        type_name: Option<&str>,
        sort_by: Option<&str>,
    ) -> Result<CmdResult> {
        let target = NoteRef::parse(target)?;
        let filter = build_filter("", type_name, sort_by, false)?;
        commands::paths::run(&mut self.session, &target, &filter)
    }

    pub fn delete(
        &mut self,
        target: &str,
        type_name: Option<&str>,
        sort_by: Option<&str>,
        assume_yes: bool,
    ) -> Result<CmdResult> {
        let target = NoteRef::parse(target)?;
        let filter = build_filter("", type_name, sort_by, false)?;
        commands::delete::run(&mut self.session, &target, &filter, assume_yes)
    }

    pub fn rename(
        &mut self,
        current: &str,
        new_name: &str,
        type_name: Option<&str>,
    ) -> Result<CmdResult> {
        let current = NoteRef::parse(current)?;
        let note_type = parse_type(type_name)?;
        commands::rename::run(&mut self.session, &current, new_name, note_type)
    }

    pub fn search(&mut self, query: &str) -> Result<CmdResult> {
        commands::search::run(&mut self.session, query)
    }

    pub fn types(&self) -> Result<CmdResult> {
        commands::types::run()
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use crate::test_utils::TestSession;

    fn api(store: InMemoryStore) -> NotesApi<InMemoryStore> {
        NotesApi::new(TestSession::new(store).session, PathBuf::from("/config"))
    }

    #[test]
    fn unknown_type_name_is_rejected() {
        let mut api = api(InMemoryStore::new());
        let err = api.create("a", Some("docx"), false).unwrap_err();
        assert!(matches!(err, NoteError::InvalidType(ref t) if t == "docx"));
    }

    #[test]
    fn type_names_and_aliases_both_work() {
        assert_eq!(parse_type(Some("latex")).unwrap().unwrap().extension, "tex");
        assert_eq!(parse_type(Some("nb")).unwrap().unwrap().extension, "ipynb");
        assert!(parse_type(Some("Markdown")).is_err());
        assert!(parse_type(None).unwrap().is_none());
    }

    #[test]
    fn sort_key_defaults_to_name() {
        assert_eq!(parse_sort_key(None).unwrap(), SortKey::Name);
        assert_eq!(parse_sort_key(Some("LastWriteTime")).unwrap(), SortKey::Modified);
        assert!(matches!(
            parse_sort_key(Some("colour")),
            Err(NoteError::InvalidSortKey(_))
        ));
    }

    #[test]
    fn default_type_fills_in_for_create() {
        let api = api(InMemoryStore::new());
        let mut api = api.with_default_type(NoteType::lookup("mermaid"));
        let result = api.create("flow", None, false).unwrap();
        assert_eq!(result.affected_notes[0].name, "flow.mmd");

        let result = api.create("paper", Some("tex"), false).unwrap();
        assert_eq!(result.affected_notes[0].name, "paper.tex");
    }

    #[test]
    fn malformed_reference_is_not_a_name() {
        let mut api = api(StoreFixture::new().with_notes(&["a.md"]).store);
        let err = api.open("/x1", None, None).unwrap_err();
        assert!(matches!(err, NoteError::MalformedReference(_)));
    }

    #[test]
    fn find_then_reference_by_number() {
        let mut api = api(
            StoreFixture::new()
                .with_notes(&["proj.a.md", "proj.b.md"])
                .store,
        );
        api.find("proj", None, None, false).unwrap();
        assert_eq!(api.cache().entries().len(), 2);

        let result = api.path("/2", None, None).unwrap();
        assert_eq!(result.note_paths, vec![PathBuf::from("/notes/proj/b.md")]);
    }
}
