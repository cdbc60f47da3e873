use crate::api::NotesApi;
use crate::cache::SelectionCache;
use crate::config::NotesConfig;
use crate::editor::EditorOpener;
use crate::error::{NoteError, Result};
use crate::finder::FzfFinder;
use crate::prompt::Prompter;
use crate::searcher::RipgrepSearcher;
use crate::session::Session;
use crate::store::fs::FileStore;
use directories::{BaseDirs, ProjectDirs};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Overrides the config and state directory.
pub const HOME_ENV: &str = "DOTNOTE_HOME";
/// Overrides the notes root, winning over the `root` config key.
pub const ROOT_ENV: &str = "DOTNOTE_ROOT";

#[derive(Debug, Clone)]
pub struct NotesPaths {
    /// Holds `config.json` and the persisted selection cache.
    pub home: PathBuf,
    pub root: PathBuf,
}

pub struct NotesContext {
    pub api: NotesApi<FileStore>,
    pub config: NotesConfig,
    pub paths: NotesPaths,
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn absolute(path: PathBuf, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

pub fn home_dir() -> Result<PathBuf> {
    if let Some(home) = env_path(HOME_ENV) {
        return Ok(home);
    }
    ProjectDirs::from("com", "dotnote", "dotnote")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| NoteError::Config("Could not determine config directory".to_string()))
}

/// `DOTNOTE_ROOT`, then the `root` key, then `notes` in the user's home.
pub fn notes_root(config: &NotesConfig, cwd: &Path) -> Result<PathBuf> {
    let root = match env_path(ROOT_ENV).or_else(|| config.root.clone()) {
        Some(root) => root,
        None => BaseDirs::new()
            .map(|dirs| dirs.home_dir().join("notes"))
            .ok_or_else(|| NoteError::Config("Could not determine home directory".to_string()))?,
    };
    Ok(absolute(root, cwd))
}

/// Builds the production context: file store, external tools from config and
/// the selection cache left by the previous invocation.
pub fn initialize(cwd: &Path, prompter: Box<dyn Prompter>) -> Result<NotesContext> {
    let home = absolute(home_dir()?, cwd);
    let config = NotesConfig::load(&home)?;
    let root = notes_root(&config, cwd)?;
    debug!(home = %home.display(), root = %root.display(), "resolved directories");

    let store = FileStore::new(root.clone());
    store.ensure_root()?;

    let previewer = Some(config.previewer.clone());
    let session = Session::new(
        store,
        prompter,
        Box::new(EditorOpener::new(config.editor.clone())),
        Box::new(FzfFinder::new(config.finder.clone(), previewer)),
        Box::new(RipgrepSearcher::new(config.searcher.clone())),
    )
    .with_cache(SelectionCache::load(&home));

    let api = NotesApi::new(session, home.clone()).with_default_type(config.default_note_type()?);

    Ok(NotesContext {
        api,
        config,
        paths: NotesPaths { home, root },
    })
}
