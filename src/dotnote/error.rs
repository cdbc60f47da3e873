use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Invalid note name: {0}")]
    InvalidName(String),

    #[error("Unknown note type: {0}")]
    InvalidType(String),

    #[error("No type for {0}: add a known extension or pass --type")]
    MissingType(String),

    #[error("Note already exists: {0}")]
    AlreadyExists(String),

    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("No previous listing to select from")]
    EmptyCache,

    #[error("Selection /{ordinal} is out of range (1-{len})")]
    OutOfRange { ordinal: usize, len: usize },

    #[error("Malformed selection reference: {0}")]
    MalformedReference(String),

    #[error("Unknown sort key: {0}")]
    InvalidSortKey(String),

    #[error("{0}")]
    External(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl NoteError {
    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            NoteError::InvalidName(_) => 10,
            NoteError::InvalidType(_) => 11,
            NoteError::MissingType(_) => 12,
            NoteError::AlreadyExists(_) => 13,
            NoteError::NotFound(_) => 14,
            NoteError::EmptyCache => 15,
            NoteError::OutOfRange { .. } => 16,
            NoteError::MalformedReference(_) => 17,
            NoteError::InvalidSortKey(_) => 18,
            NoteError::External(_) => 20,
            NoteError::Config(_) => 21,
            NoteError::Io(_) | NoteError::Serialization(_) | NoteError::Pattern(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, NoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_have_distinct_exit_codes() {
        let errors = [
            NoteError::InvalidName("a..b".into()),
            NoteError::InvalidType("doc".into()),
            NoteError::MissingType("a".into()),
            NoteError::AlreadyExists("a.md".into()),
            NoteError::NotFound("a.md".into()),
            NoteError::EmptyCache,
            NoteError::OutOfRange { ordinal: 4, len: 2 },
            NoteError::MalformedReference("/x".into()),
            NoteError::InvalidSortKey("color".into()),
        ];
        let mut codes: Vec<i32> = errors.iter().map(|e| e.exit_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|c| *c != 0));
    }

    #[test]
    fn out_of_range_message_names_bounds() {
        let err = NoteError::OutOfRange { ordinal: 7, len: 3 };
        assert_eq!(err.to_string(), "Selection /7 is out of range (1-3)");
    }
}
