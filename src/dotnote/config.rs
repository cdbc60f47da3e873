//! # Configuration
//!
//! Settings live in `config.json` inside the dotnote home directory (see
//! [`crate::init`] for how that directory is found).
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `root` | `<home>/notes` | Notes root directory |
//! | `editor` | `$EDITOR`, `$VISUAL`, vim/vi/nano | Command used to open notes |
//! | `finder` | `fzf` | Interactive fuzzy finder |
//! | `searcher` | `rg` | Content search tool |
//! | `previewer` | `bat` | Preview command inside the finder; empty disables |
//! | `default_type` | unset | Type used by `create` when the name has no extension |
//!
//! Optional keys are cleared by setting them to an empty string.

use crate::error::{NoteError, Result};
use crate::model::NoteType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

pub const CONFIG_KEYS: &[&str] = &[
    "root",
    "editor",
    "finder",
    "searcher",
    "previewer",
    "default_type",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    #[serde(default = "default_finder")]
    pub finder: String,

    #[serde(default = "default_searcher")]
    pub searcher: String,

    #[serde(default = "default_previewer")]
    pub previewer: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_type: Option<String>,
}

fn default_finder() -> String {
    "fzf".to_string()
}

fn default_searcher() -> String {
    "rg".to_string()
}

fn default_previewer() -> String {
    "bat".to_string()
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            root: None,
            editor: None,
            finder: default_finder(),
            searcher: default_searcher(),
            previewer: default_previewer(),
            default_type: None,
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl NotesConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NoteError::Io)?;
        let config: NotesConfig =
            serde_json::from_str(&content).map_err(NoteError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NoteError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(NoteError::Serialization)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content).map_err(NoteError::Io)?;
        Ok(())
    }

    /// The configured default type, validated against the registry.
    pub fn default_note_type(&self) -> Result<Option<&'static NoteType>> {
        match &self.default_type {
            None => Ok(None),
            Some(name) => NoteType::lookup(name)
                .map(Some)
                .ok_or_else(|| NoteError::InvalidType(name.clone())),
        }
    }

    /// Display value for a key. `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "root" => self
                .root
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "editor" => self.editor.clone().unwrap_or_default(),
            "finder" => self.finder.clone(),
            "searcher" => self.searcher.clone(),
            "previewer" => self.previewer.clone(),
            "default_type" => self.default_type.clone().unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "root" => self.root = optional(value).map(PathBuf::from),
            "editor" => self.editor = optional(value),
            "finder" | "searcher" => {
                let command = optional(value)
                    .ok_or_else(|| NoteError::Config(format!("{} cannot be empty", key)))?;
                if key == "finder" {
                    self.finder = command;
                } else {
                    self.searcher = command;
                }
            }
            "previewer" => self.previewer = value.trim().to_string(),
            "default_type" => {
                let value = optional(value);
                if let Some(name) = &value {
                    if NoteType::lookup(name).is_none() {
                        return Err(NoteError::InvalidType(name.clone()));
                    }
                }
                self.default_type = value;
            }
            _ => return Err(NoteError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    /// Every key with its display value, in a stable order.
    pub fn list_all(&self) -> Vec<(String, String)> {
        CONFIG_KEYS
            .iter()
            .map(|key| (key.to_string(), self.get(key).unwrap_or_default()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_name_the_usual_tools() {
        let config = NotesConfig::default();
        assert_eq!(config.finder, "fzf");
        assert_eq!(config.searcher, "rg");
        assert_eq!(config.previewer, "bat");
        assert!(config.root.is_none());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = NotesConfig::load(dir.path()).unwrap();
        assert_eq!(config, NotesConfig::default());
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut config = NotesConfig::default();
        config.set("default_type", "tex").unwrap();
        config.set("root", "/tmp/elsewhere").unwrap();
        config.save(dir.path().join("nested")).unwrap();

        let loaded = NotesConfig::load(dir.path().join("nested")).unwrap();
        assert_eq!(loaded.default_type.as_deref(), Some("tex"));
        assert_eq!(loaded.root, Some(PathBuf::from("/tmp/elsewhere")));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"finder": "sk"}"#).unwrap();
        let config = NotesConfig::load(dir.path()).unwrap();
        assert_eq!(config.finder, "sk");
        assert_eq!(config.searcher, "rg");
    }

    #[test]
    fn default_type_must_be_registered() {
        let mut config = NotesConfig::default();
        assert!(matches!(
            config.set("default_type", "docx"),
            Err(NoteError::InvalidType(_))
        ));
        config.set("default_type", "latex").unwrap();
        assert_eq!(config.default_note_type().unwrap().unwrap().extension, "tex");
    }

    #[test]
    fn empty_value_clears_optional_keys() {
        let mut config = NotesConfig::default();
        config.set("editor", "hx").unwrap();
        config.set("editor", "").unwrap();
        assert!(config.editor.is_none());
        assert!(config.set("finder", " ").is_err());
    }

    #[test]
    fn unknown_key_is_a_config_error() {
        let mut config = NotesConfig::default();
        assert!(config.get("colour").is_none());
        assert!(matches!(
            config.set("colour", "red"),
            Err(NoteError::Config(_))
        ));
    }

    #[test]
    fn list_all_covers_every_key() {
        let keys: Vec<String> = NotesConfig::default()
            .list_all()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, CONFIG_KEYS);
    }
}
