//! JSON command protocol for scripted editing sessions.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::harness::EditorHarness;
use crate::state::Control;

/// A command a script can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Press the Draw button.
    EnterDraw,
    /// Press the Extrude button.
    Extrude,
    /// Press the Move button.
    EnterMove,
    /// Press the Edit Vertex button.
    EnterVertexEdit,
    /// Primary click above a ground position.
    Click { x: f32, z: f32 },
    /// Complete / cancel.
    Secondary,
    /// Pointer move above a ground position.
    PointerMove { x: f32, z: f32 },
    /// Report mode, controls and shapes.
    Inspect,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut EditorHarness, cmd: EditorCommand) -> CommandResponse {
    let effects = match cmd {
        EditorCommand::EnterDraw => press(harness, Control::Draw),
        EditorCommand::Extrude => press(harness, Control::Extrude),
        EditorCommand::EnterMove => press(harness, Control::Move),
        EditorCommand::EnterVertexEdit => press(harness, Control::EditVertex),
        EditorCommand::Click { x, z } => Ok(harness.click(x, z).len()),
        EditorCommand::Secondary => Ok(harness.secondary().len()),
        EditorCommand::PointerMove { x, z } => Ok(harness.move_pointer(x, z).len()),
        EditorCommand::Inspect => return CommandResponse::ok_with_data(inspect(harness)),
    };
    match effects {
        Ok(effects) => CommandResponse::ok_with_data(json!({
            "mode": harness.mode(),
            "effects": effects,
        })),
        Err(e) => CommandResponse::err(e),
    }
}

fn press(harness: &mut EditorHarness, control: Control) -> Result<usize, String> {
    if !harness.editor.controls().is_enabled(control) {
        return Err(format!(
            "'{}' is not available in {} mode",
            control.label(),
            harness.mode().label()
        ));
    }
    let effects = match control {
        Control::Draw => harness.enter_draw(),
        Control::Extrude => harness.extrude(),
        Control::Move => harness.enter_move(),
        Control::EditVertex => harness.enter_vertex_edit(),
    };
    Ok(effects.len())
}

fn planar(points: &[Vec3]) -> Vec<[f32; 2]> {
    points.iter().map(|p| [p.x, p.z]).collect()
}

/// Snapshot of the session for inspection
pub fn inspect(harness: &EditorHarness) -> serde_json::Value {
    let editor = &harness.editor;
    let shapes = editor.shapes();
    let polygons: Vec<serde_json::Value> = shapes
        .polygons()
        .iter()
        .enumerate()
        .map(|(index, polygon)| {
            let solid = shapes.solid_for_shape(index).map(|s| {
                json!({
                    "position": s.position.to_array(),
                    "footprint": planar(&s.footprint()),
                    "highlighted": s.style.highlighted,
                })
            });
            json!({
                "index": index,
                "loop": planar(&polygon.point_loop()),
                "extruded": solid.is_some(),
                "solid": solid,
            })
        })
        .collect();

    json!({
        "mode": harness.mode(),
        "controls": editor.controls(),
        "draw_buffer": planar(editor.mode().draw_buffer()),
        "draft": planar(editor.draft()),
        "polygon_count": shapes.polygon_count(),
        "solid_count": shapes.solid_count(),
        "primitive_count": editor.scene().len(),
        "polygons": polygons,
    })
}

/// Parse and execute a single JSON command.
pub fn execute_json(harness: &mut EditorHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: EditorCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute a JSON array of commands.
pub fn execute_json_batch(
    harness: &mut EditorHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<EditorCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_click() {
        let json = r#"{"command": "click", "x": 0.5, "z": -0.25}"#;
        let cmd: EditorCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, EditorCommand::Click { x, z } if x == 0.5 && z == -0.25));
    }

    #[test]
    fn test_command_serde_unit_variants() {
        let cmd: EditorCommand = serde_json::from_str(r#"{"command": "enter_vertex_edit"}"#).unwrap();
        assert!(matches!(cmd, EditorCommand::EnterVertexEdit));
        let cmd: EditorCommand = serde_json::from_str(r#"{"command": "secondary"}"#).unwrap();
        assert!(matches!(cmd, EditorCommand::Secondary));
    }

    #[test]
    fn test_invalid_json() {
        let mut h = EditorHarness::new();
        let err = execute_json(&mut h, r#"{"command": "fly"}"#).unwrap_err();
        assert!(err.starts_with("Invalid command JSON"));
        let err = execute_json_batch(&mut h, "not json").unwrap_err();
        assert!(err.starts_with("Invalid commands JSON"));
    }

    #[test]
    fn test_disabled_control_reports_error() {
        let mut h = EditorHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "extrude"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("Extrude"));
    }

    #[test]
    fn test_click_reports_mode_and_effects() {
        let mut h = EditorHarness::new();
        execute_json(&mut h, r#"{"command": "enter_draw"}"#).unwrap();
        let resp = execute_json(&mut h, r#"{"command": "click", "x": 0.1, "z": 0.1}"#).unwrap();
        assert!(resp.success);
        let data = resp.data.unwrap();
        assert_eq!(data["mode"], "draw");
        assert_eq!(data["effects"], 1);
    }

    #[test]
    fn test_inspect_reports_unfinished_drawing() {
        let mut h = EditorHarness::new();
        h.draw_polygon(&[(0.0, 0.0), (0.5, 0.0)]);
        let data = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap().data.unwrap();
        assert_eq!(data["mode"], "idle");
        assert_eq!(data["polygon_count"], 0);
        assert_eq!(data["draft"].as_array().unwrap().len(), 2);
        assert_eq!(data["draw_buffer"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_inspect_lists_polygons() {
        let mut h = EditorHarness::new();
        h.draw_polygon(&[(0.0, 0.0), (0.5, 0.0), (0.5, 0.5)]);
        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["mode"], "idle");
        assert_eq!(data["polygon_count"], 1);
        assert_eq!(data["controls"]["extrude"], true);
        assert_eq!(data["polygons"][0]["extruded"], false);
        assert_eq!(data["polygons"][0]["loop"].as_array().unwrap().len(), 4);
        assert!(data["polygons"][0]["solid"].is_null());
    }
}
