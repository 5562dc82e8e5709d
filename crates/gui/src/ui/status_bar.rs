use egui::Ui;

use crate::editor::Editor;
use crate::state::Mode;

fn hint(mode: &Mode, draft: usize) -> String {
    match mode {
        Mode::Idle if draft > 0 => format!("{draft} unfinished point(s), Draw to continue"),
        Mode::Idle => "Pick a tool".to_string(),
        Mode::Draw { buffer } => match buffer.len() {
            0 => "Click the ground to place the first point".to_string(),
            n @ 1..=2 => format!("{n} point(s), at least 3 distinct needed"),
            n => format!("{n} points, right click to close"),
        },
        Mode::Move { grab: None } => "Click a solid to pick it up".to_string(),
        Mode::Move { grab: Some(_) } => "Move to drag, right click to drop".to_string(),
        Mode::VertexEdit { grab: None } => "Click a vertex to pick it up".to_string(),
        Mode::VertexEdit { grab: Some(_) } => "Move to reshape, right click to finish".to_string(),
    }
}

pub fn show(ui: &mut Ui, editor: &Editor) {
    ui.horizontal(|ui| {
        let mode = editor.mode();
        ui.strong(mode.kind().label());
        ui.separator();
        ui.label(hint(mode, editor.draft().len()));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let shapes = editor.shapes();
            ui.weak(format!("Solids: {}", shapes.solid_count()));
            ui.separator();
            ui.weak(format!("Polygons: {}", shapes.polygon_count()));
        });
    });
}
