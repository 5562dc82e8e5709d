//! Integration tests for the EditorCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use footprint_lib::command::{execute_json, execute_json_batch};
use footprint_lib::harness::EditorHarness;

const DRAW_TRIANGLE: &str = r#"[
    {"command": "enter_draw"},
    {"command": "click", "x": 0.0, "z": 0.0},
    {"command": "click", "x": 1.0, "z": 0.0},
    {"command": "click", "x": 1.0, "z": 1.0},
    {"command": "secondary"}
]"#;

fn approx(value: &serde_json::Value, expected: f64) -> bool {
    value.as_f64().is_some_and(|v| (v - expected).abs() < 1e-4)
}

#[test]
fn test_command_draw_batch() {
    let mut h = EditorHarness::new();
    let responses = execute_json_batch(&mut h, DRAW_TRIANGLE).unwrap();

    assert_eq!(responses.len(), 5);
    assert!(responses.iter().all(|r| r.success));
    assert_eq!(responses[0].data.as_ref().unwrap()["mode"], "draw");
    assert_eq!(responses[4].data.as_ref().unwrap()["mode"], "idle");
    assert_eq!(h.polygon_count(), 1);
}

#[test]
fn test_command_extrude_and_inspect() {
    let mut h = EditorHarness::new();
    execute_json_batch(&mut h, DRAW_TRIANGLE).unwrap();

    let resp = execute_json(&mut h, r#"{"command": "extrude"}"#).unwrap();
    assert!(resp.success);

    let data = execute_json(&mut h, r#"{"command": "inspect"}"#)
        .unwrap()
        .data
        .unwrap();
    assert_eq!(data["solid_count"], 1);
    assert_eq!(data["controls"]["extrude"], false);
    assert_eq!(data["controls"]["draw"], true);

    let polygon = &data["polygons"][0];
    assert_eq!(polygon["extruded"], true);
    assert!(approx(&polygon["solid"]["position"][1], 0.3));
    assert_eq!(polygon["solid"]["footprint"].as_array().unwrap().len(), 3);
    assert_eq!(polygon["solid"]["highlighted"], false);
    // ground + 3 markers + line + solid
    assert_eq!(data["primitive_count"], 6);
}

#[test]
fn test_command_move_workflow() {
    let mut h = EditorHarness::new();
    execute_json_batch(&mut h, DRAW_TRIANGLE).unwrap();
    let json = r#"[
        {"command": "extrude"},
        {"command": "enter_move"},
        {"command": "click", "x": 0.7, "z": 0.3},
        {"command": "inspect"},
        {"command": "pointer_move", "x": 0.2, "z": -0.2},
        {"command": "secondary"},
        {"command": "inspect"}
    ]"#;
    let responses = execute_json_batch(&mut h, json).unwrap();
    assert!(responses.iter().all(|r| r.success));

    let grabbed = responses[3].data.as_ref().unwrap();
    assert_eq!(grabbed["mode"], "move");
    assert_eq!(grabbed["polygons"][0]["solid"]["highlighted"], true);

    let released = responses[6].data.as_ref().unwrap();
    assert_eq!(released["mode"], "idle");
    assert_eq!(released["polygons"][0]["solid"]["highlighted"], false);
    let first = &released["polygons"][0]["loop"][0];
    assert!(approx(&first[0], -0.5));
    assert!(approx(&first[1], -0.5));
}

#[test]
fn test_command_draw_buffer_in_progress() {
    let mut h = EditorHarness::new();
    let json = r#"[
        {"command": "enter_draw"},
        {"command": "click", "x": 0.25, "z": 0.5},
        {"command": "inspect"}
    ]"#;
    let responses = execute_json_batch(&mut h, json).unwrap();
    let data = responses[2].data.as_ref().unwrap();
    assert_eq!(data["draw_buffer"].as_array().unwrap().len(), 1);
    assert_eq!(data["polygon_count"], 0);
    assert_eq!(data["controls"]["move_shape"], false);
}

#[test]
fn test_command_disabled_controls_fail() {
    let mut h = EditorHarness::new();
    let json = r#"[
        {"command": "extrude"},
        {"command": "enter_draw"},
        {"command": "enter_move"},
        {"command": "enter_vertex_edit"}
    ]"#;
    let responses = execute_json_batch(&mut h, json).unwrap();

    assert!(!responses[0].success);
    assert!(responses[1].success);
    assert!(!responses[2].success);
    assert!(responses[2].error.as_ref().unwrap().contains("Draw"));
    assert!(!responses[3].success);
}

#[test]
fn test_command_invalid_json_error() {
    let mut h = EditorHarness::new();
    let result = execute_json(&mut h, "not valid json");
    assert!(result.is_err());
    let result = execute_json(&mut h, r#"{"command": "click", "x": 1.0}"#);
    assert!(result.is_err());
}
