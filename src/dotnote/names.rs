//! # Dotted Names
//!
//! A note is addressed by a dotted name such as `project.meeting.md`. The final
//! segment is the type suffix (a known extension); every other `.` marks one
//! level of directory nesting under the notes root:
//!
//! ```text
//! notes.md             ->  notes.md
//! project.meeting.md   ->  project/meeting.md
//! a.b.c.md             ->  a/b/c.md
//! ```
//!
//! The mapping is a bijection for valid names: turning path separators back
//! into dots yields the original name.

use crate::error::{NoteError, Result};
use crate::model::NoteType;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Component, Path, PathBuf};

static VALID_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_+!@#%&\-]+(\.[A-Za-z0-9_+!@#%&\-]+)*$")
        .expect("note name pattern is valid")
});

/// Non-empty, allowed characters only, no `..`, no leading or trailing `.`.
pub fn is_valid_name(name: &str) -> bool {
    VALID_NAME.is_match(name)
}

pub fn is_valid_type_name(name: &str) -> bool {
    NoteType::lookup(name).is_some()
}

/// True when the text after the last `.` is a known extension.
pub fn has_known_extension(name: &str) -> bool {
    known_extension(name).is_some()
}

pub fn known_extension(name: &str) -> Option<&'static NoteType> {
    name.rsplit_once('.')
        .and_then(|(_, ext)| NoteType::from_extension(ext))
}

/// Maps `a.b.c.md` to `a/b/c.md`.
pub fn to_relative_path(name: &str) -> Result<PathBuf> {
    if !is_valid_name(name) || !has_known_extension(name) {
        return Err(NoteError::InvalidName(name.to_string()));
    }

    // Every dot is a separator except the last, which joins leaf and extension.
    let (stem, ext) = name
        .rsplit_once('.')
        .ok_or_else(|| NoteError::InvalidName(name.to_string()))?;
    let mut segments: Vec<&str> = stem.split('.').collect();
    let leaf = segments.pop().unwrap_or_default();

    let mut path = PathBuf::new();
    for dir in segments {
        path.push(dir);
    }
    path.push(format!("{}.{}", leaf, ext));
    Ok(path)
}

/// Inverse of [`to_relative_path`]. `relative` must already be truncated to the notes root.
pub fn to_dotted_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Appends the explicit type's extension unless `name` already carries a known one.
pub fn resolve_type_suffix(name: &str, explicit: Option<&NoteType>) -> Result<String> {
    if has_known_extension(name) {
        return Ok(name.to_string());
    }
    match explicit {
        Some(t) => Ok(format!("{}.{}", name, t.extension)),
        None => Err(NoteError::MissingType(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_names() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("a..b"));
        assert!(!is_valid_name(".a"));
        assert!(!is_valid_name("a."));
        assert!(!is_valid_name("a b"));
        assert!(!is_valid_name("a/b"));
        assert!(!is_valid_name("proj*"));
    }

    #[test]
    fn accepts_allowed_characters() {
        assert!(is_valid_name("a"));
        assert!(is_valid_name("project.meeting.notes"));
        assert!(is_valid_name("c++.tips&tricks.md"));
        assert!(is_valid_name("todo!.@home.#1.50%-off_v2"));
    }

    #[test]
    fn detects_known_extensions() {
        assert!(has_known_extension("notes.md"));
        assert!(has_known_extension("a.b.ipynb"));
        assert!(!has_known_extension("notes.txt"));
        assert!(!has_known_extension("notes"));
        assert!(!has_known_extension("md"));
    }

    #[test]
    fn type_names_match_exactly() {
        assert!(is_valid_type_name("markdown"));
        assert!(is_valid_type_name("md"));
        assert!(!is_valid_type_name("MD"));
        assert!(!is_valid_type_name("txt"));
    }

    #[test]
    fn maps_names_to_nested_paths() {
        assert_eq!(to_relative_path("notes.md").unwrap(), PathBuf::from("notes.md"));
        assert_eq!(
            to_relative_path("project.meeting.md").unwrap(),
            Path::new("project").join("meeting.md")
        );
        assert_eq!(
            to_relative_path("a.b.c.md").unwrap(),
            Path::new("a").join("b").join("c.md")
        );
    }

    #[test]
    fn refuses_unmappable_names() {
        assert!(matches!(
            to_relative_path("notes"),
            Err(NoteError::InvalidName(_))
        ));
        assert!(matches!(
            to_relative_path("notes.txt"),
            Err(NoteError::InvalidName(_))
        ));
        assert!(matches!(
            to_relative_path("a..md"),
            Err(NoteError::InvalidName(_))
        ));
    }

    #[test]
    fn round_trips_one_two_and_many_segments() {
        for name in [
            "notes.md",
            "project.meeting.md",
            "a.b.c.md",
            "work.2024.q3.review.retro.tex",
        ] {
            let path = to_relative_path(name).unwrap();
            assert_eq!(to_dotted_name(&path), name);
        }
    }

    #[test]
    fn type_suffix_resolution() {
        let md = NoteType::lookup("markdown");
        assert_eq!(resolve_type_suffix("a.md", None).unwrap(), "a.md");
        assert_eq!(resolve_type_suffix("a.md", NoteType::lookup("tex")).unwrap(), "a.md");
        assert_eq!(resolve_type_suffix("a.b", md).unwrap(), "a.b.md");
        assert!(matches!(
            resolve_type_suffix("a.b", None),
            Err(NoteError::MissingType(_))
        ));
    }
}
