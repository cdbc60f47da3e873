use super::NoteStore;
use crate::error::{NoteError, Result};
use crate::model::NoteFile;
use crate::names::{has_known_extension, to_dotted_name};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Creates the root directory when it does not exist yet.
    pub fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            info!(root = %self.root.display(), "creating notes root");
            fs::create_dir_all(&self.root).map_err(NoteError::Io)?;
        }
        Ok(())
    }

    fn load(&self, relative: &Path) -> Result<NoteFile> {
        let path = self.root.join(relative);
        let meta = fs::metadata(&path).map_err(NoteError::Io)?;
        let modified: DateTime<Utc> = meta.modified().map_err(NoteError::Io)?.into();
        // Not every filesystem records birth or access times.
        let created = meta.created().map(Into::into).unwrap_or(modified);
        let accessed = meta.accessed().map(Into::into).unwrap_or(modified);

        Ok(NoteFile {
            name: to_dotted_name(relative),
            relative: relative.to_path_buf(),
            path,
            size: meta.len(),
            created,
            accessed,
            modified,
        })
    }

    fn ensure_parent(&self, relative: &Path) -> Result<()> {
        if let Some(parent) = self.root.join(relative).parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(NoteError::Io)?;
            }
        }
        Ok(())
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

impl NoteStore for FileStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn list_notes(&self) -> Result<Vec<NoteFile>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut notes = Vec::new();
        for entry in WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            if !has_known_extension(&entry.file_name().to_string_lossy()) {
                continue;
            }
            notes.push(self.load(relative)?);
        }
        debug!(count = notes.len(), "listed notes");
        Ok(notes)
    }

    fn note(&self, relative: &Path) -> Result<Option<NoteFile>> {
        if !self.root.join(relative).is_file() {
            return Ok(None);
        }
        self.load(relative).map(Some)
    }

    fn create_note(&mut self, relative: &Path) -> Result<NoteFile> {
        self.ensure_parent(relative)?;
        let path = self.root.join(relative);
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    NoteError::AlreadyExists(to_dotted_name(relative))
                }
                _ => NoteError::Io(e),
            })?;
        info!(path = %path.display(), "created note");
        self.load(relative)
    }

    fn remove_note(&mut self, relative: &Path) -> Result<()> {
        let path = self.root.join(relative);
        fs::remove_file(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => NoteError::NotFound(to_dotted_name(relative)),
            _ => NoteError::Io(e),
        })?;
        info!(path = %path.display(), "removed note");
        Ok(())
    }

    fn move_note(&mut self, from: &Path, to: &Path) -> Result<NoteFile> {
        let source = self.root.join(from);
        let target = self.root.join(to);
        if !source.is_file() {
            return Err(NoteError::NotFound(to_dotted_name(from)));
        }
        if target.exists() {
            return Err(NoteError::AlreadyExists(to_dotted_name(to)));
        }
        self.ensure_parent(to)?;
        fs::rename(&source, &target).map_err(NoteError::Io)?;
        info!(from = %source.display(), to = %target.display(), "moved note");
        self.load(to)
    }

    fn prune_empty_dirs(&mut self) -> Result<Vec<PathBuf>> {
        let mut dirs: Vec<PathBuf> = WalkDir::new(&self.root)
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
            .map(|e| e.into_path())
            .collect();

        // Deepest first, so a parent emptied by its child's removal is seen afterwards.
        dirs.sort_by_key(|d| std::cmp::Reverse(d.components().count()));

        let mut removed = Vec::new();
        for dir in dirs {
            if dir == self.root {
                continue;
            }
            let is_empty = fs::read_dir(&dir)
                .map_err(NoteError::Io)?
                .next()
                .is_none();
            if is_empty {
                fs::remove_dir(&dir).map_err(NoteError::Io)?;
                info!(dir = %dir.display(), "removed empty directory");
                if let Ok(relative) = dir.strip_prefix(&self.root) {
                    removed.push(relative.to_path_buf());
                }
            }
        }
        Ok(removed)
    }
}
