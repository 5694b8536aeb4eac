//! JSON command scripts for headless runs.
//!
//! A script is a JSON array of [`Command`] objects tagged by `"command"`:
//!
//! ```json
//! [
//!   { "command": "add_wall", "start": [0, 0, 0], "end": [5, 0, 0], "height": 3, "thickness": 0.2 },
//!   { "command": "select", "target": "last" },
//!   { "command": "edit_element", "changes": { "kind": "wall", "thickness": 0.3 } },
//!   { "command": "apply_edit" }
//! ]
//! ```

use std::path::Path;

use crate::error::ScriptError;
use crate::scene::SceneHost;
use crate::session::{Command, Outcome, Session};

pub fn parse_script(content: &str) -> Result<Vec<Command>, ScriptError> {
    Ok(serde_json::from_str(content)?)
}

pub fn load_script<P: AsRef<Path>>(path: P) -> Result<Vec<Command>, ScriptError> {
    let content = std::fs::read_to_string(&path).map_err(|source| ScriptError::FileRead {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    parse_script(&content)
}

/// Result of one script step. Rejected commands carry the error message.
#[derive(Debug)]
pub struct Step {
    pub index: usize,
    pub result: Result<Outcome, String>,
}

#[derive(Debug, Default)]
pub struct ScriptReport {
    pub steps: Vec<Step>,
}

impl ScriptReport {
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.steps.iter().filter(|s| s.result.is_err()).count()
    }

    #[must_use]
    pub fn warnings(&self) -> usize {
        self.steps
            .iter()
            .filter_map(|s| s.result.as_ref().ok())
            .map(|o| o.warnings().len())
            .sum()
    }
}

/// Dispatches every command in order. A rejected command is recorded and
/// the run continues, matching how the interactive UI treats bad input.
pub fn run_script<H: SceneHost>(session: &mut Session<H>, commands: Vec<Command>) -> ScriptReport {
    let mut report = ScriptReport::default();
    for (index, command) in commands.into_iter().enumerate() {
        let result = session.dispatch(command).map_err(|e| {
            tracing::warn!(step = index, error = %e, "command rejected");
            e.to_string()
        });
        report.steps.push(Step { index, result });
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ParameterChanges;
    use crate::scene::{CatalogueLoader, InMemoryScene};
    use crate::session::Target;
    use pretty_assertions::assert_eq;

    const SCRIPT: &str = r#"[
        { "command": "add_wall", "start": [0, 0, 0], "end": [5, 0, 0], "height": 3, "thickness": 0.2 },
        { "command": "add_wall", "start": [1, 0, 1], "end": [1, 0, 1], "height": 3, "thickness": 0.2 },
        { "command": "add_slab", "width": 6, "depth": 6, "thickness": 0 },
        { "command": "place_furniture", "source_path": "chair.glb", "position_x": 1.5, "position_z": 2 },
        { "command": "select", "target": "last" },
        { "command": "edit_element", "changes": { "kind": "furniture", "position_x": 3 } },
        { "command": "apply_edit" }
    ]"#;

    #[test]
    fn parses_tagged_commands() {
        let commands = parse_script(SCRIPT).unwrap();
        assert_eq!(commands.len(), 7);
        assert_eq!(
            commands[4],
            Command::Select {
                target: Target::Last
            }
        );
        assert!(matches!(
            &commands[5],
            Command::EditElement {
                target: Target::Selected,
                changes: Some(ParameterChanges::Furniture(_)),
                material: None,
            }
        ));
    }

    #[test]
    fn run_continues_past_rejected_commands() {
        let mut session = Session::new(InMemoryScene::new(), Box::new(CatalogueLoader::default()));
        let report = run_script(&mut session, parse_script(SCRIPT).unwrap());

        assert_eq!(report.steps.len(), 7);
        assert_eq!(report.rejected(), 1);
        assert!(report.steps[1].result.is_err());
        assert_eq!(report.warnings(), 1);
        assert_eq!(session.len(), 3);
        assert_eq!(session.host().len(), 3);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert!(matches!(
            parse_script(r#"[{ "command": "fly" }]"#),
            Err(ScriptError::Parse { .. })
        ));
    }
}
