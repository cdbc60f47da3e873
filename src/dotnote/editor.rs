use crate::error::{NoteError, Result};
use std::env;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Hands a note to whatever the user edits notes with.
pub trait Opener {
    fn open(&mut self, path: &Path) -> Result<()>;
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(NoteError::External(
        "No editor found. Set $EDITOR or the `editor` config key.".to_string(),
    ))
}

/// Splits an editor setting like `code --wait` into program and leading arguments.
fn split_command(command: &str) -> Option<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Launches an editor and waits for it to exit.
pub struct EditorOpener {
    editor: Option<String>,
}

impl EditorOpener {
    /// `editor` overrides the environment lookup when set.
    pub fn new(editor: Option<String>) -> Self {
        Self { editor }
    }
}

impl Opener for EditorOpener {
    fn open(&mut self, path: &Path) -> Result<()> {
        let editor = match &self.editor {
            Some(e) if !e.trim().is_empty() => e.clone(),
            _ => get_editor()?,
        };
        let (program, args) = split_command(&editor)
            .ok_or_else(|| NoteError::External("Editor command is empty".to_string()))?;

        debug!(editor = %editor, path = %path.display(), "launching editor");
        let status = Command::new(&program)
            .args(&args)
            .arg(path)
            .status()
            .map_err(|e| NoteError::External(format!("Failed to launch editor '{}': {}", editor, e)))?;

        if !status.success() {
            return Err(NoteError::External(format!(
                "Editor '{}' exited with non-zero status",
                editor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_editor_arguments() {
        assert_eq!(
            split_command("code --wait"),
            Some(("code".to_string(), vec!["--wait".to_string()]))
        );
        assert_eq!(split_command("vim"), Some(("vim".to_string(), vec![])));
        assert_eq!(split_command("   "), None);
    }

    #[cfg(unix)]
    #[test]
    fn configured_editor_runs_with_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let note = temp.path().join("a.md");
        std::fs::write(&note, "").unwrap();

        let mut opener = EditorOpener::new(Some("true".to_string()));
        opener.open(&note).unwrap();

        let mut failing = EditorOpener::new(Some("false".to_string()));
        assert!(matches!(failing.open(&note), Err(NoteError::External(_))));
    }
}
