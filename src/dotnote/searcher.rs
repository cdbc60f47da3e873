use crate::error::{NoteError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// A single content hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentMatch {
    pub path: PathBuf,
    pub line: usize,
    pub column: usize,
    pub text: String,
}

/// Full-text search across the notes tree.
pub trait ContentSearcher {
    fn search(&mut self, query: &str, root: &Path) -> Result<Vec<ContentMatch>>;
}

/// Shells out to ripgrep in `--vimgrep` mode.
pub struct RipgrepSearcher {
    command: String,
}

impl RipgrepSearcher {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

/// Parses `path:line:column:text`.
pub fn parse_vimgrep_line(line: &str) -> Option<ContentMatch> {
    let mut parts = line.splitn(4, ':');
    let path = parts.next()?;
    let line_no = parts.next()?.parse().ok()?;
    let column = parts.next()?.parse().ok()?;
    let text = parts.next().unwrap_or_default();
    if path.is_empty() {
        return None;
    }
    Some(ContentMatch {
        path: PathBuf::from(path),
        line: line_no,
        column,
        text: text.to_string(),
    })
}

impl ContentSearcher for RipgrepSearcher {
    fn search(&mut self, query: &str, root: &Path) -> Result<Vec<ContentMatch>> {
        debug!(searcher = %self.command, query, "searching note contents");
        let output = Command::new(&self.command)
            .args(["--vimgrep", "--smart-case", "--", query])
            .arg(root)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    NoteError::External(format!("Content searcher '{}' not found", self.command))
                }
                _ => NoteError::External(format!("Failed to start '{}': {}", self.command, e)),
            })?;

        match output.status.code() {
            Some(0) => Ok(String::from_utf8_lossy(&output.stdout)
                .lines()
                .filter_map(parse_vimgrep_line)
                .collect()),
            Some(1) => Ok(Vec::new()),
            _ => Err(NoteError::External(format!(
                "Content searcher '{}' failed: {}",
                self.command,
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }
}
