use crate::error::{NoteError, Result};
use crate::model::NoteFile;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Interactive fuzzy selection over a candidate list.
pub trait FuzzyFinder {
    /// Returns the chosen note's path, or `None` if the user cancelled.
    fn choose(&mut self, candidates: &[NoteFile], query: &str) -> Result<Option<PathBuf>>;
}

/// Runs an fzf-compatible finder with a preview pane.
pub struct FzfFinder {
    command: String,
    previewer: Option<String>,
}

impl FzfFinder {
    pub fn new(command: impl Into<String>, previewer: Option<String>) -> Self {
        Self {
            command: command.into(),
            previewer: previewer.filter(|p| !p.trim().is_empty()),
        }
    }

    fn args(&self, query: &str) -> Vec<String> {
        let mut args = vec![
            "--query".to_string(),
            query.to_string(),
            "--delimiter".to_string(),
            "\t".to_string(),
            "--with-nth".to_string(),
            "1".to_string(),
        ];
        if let Some(previewer) = &self.previewer {
            args.push("--preview".to_string());
            args.push(format!("{} --color=always {{2}}", previewer));
        }
        args
    }
}

/// One line per candidate: display name, tab, absolute path.
fn format_candidates(candidates: &[NoteFile]) -> String {
    let mut out = String::new();
    for note in candidates {
        out.push_str(&note.name);
        out.push('\t');
        out.push_str(&note.path.to_string_lossy());
        out.push('\n');
    }
    out
}

fn parse_selection(output: &str) -> Option<PathBuf> {
    let line = output.lines().next()?.trim_end();
    let path = line.split_once('\t').map(|(_, p)| p).unwrap_or(line);
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

impl FuzzyFinder for FzfFinder {
    fn choose(&mut self, candidates: &[NoteFile], query: &str) -> Result<Option<PathBuf>> {
        if candidates.is_empty() {
            return Ok(None);
        }
        debug!(finder = %self.command, candidates = candidates.len(), query, "starting fuzzy finder");

        let mut child = Command::new(&self.command)
            .args(self.args(query))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    NoteError::External(format!("Fuzzy finder '{}' not found", self.command))
                }
                _ => NoteError::External(format!("Failed to start '{}': {}", self.command, e)),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(format_candidates(candidates).as_bytes())
                .map_err(NoteError::Io)?;
        }

        let output = child.wait_with_output().map_err(NoteError::Io)?;
        match output.status.code() {
            Some(0) => Ok(parse_selection(&String::from_utf8_lossy(&output.stdout))),
            // 1: nothing matched, 130: the user pressed escape.
            Some(1) | Some(130) => Ok(None),
            _ => Err(NoteError::External(format!(
                "Fuzzy finder '{}' failed",
                self.command
            ))),
        }
    }
}
