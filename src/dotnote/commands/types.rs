use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::NOTE_TYPES;

pub fn run() -> Result<CmdResult> {
    Ok(CmdResult::default().with_note_types(NOTE_TYPES.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_registry_in_order() {
        let result = run().unwrap();
        let names: Vec<&str> = result.note_types.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["markdown", "notebook", "latex", "mermaid"]);
    }
}
