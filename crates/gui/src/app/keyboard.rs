//! Keyboard shortcut handling

use eframe::egui;

use crate::editor::Editor;
use crate::input::Input;
use crate::state::Control;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, editor: &mut Editor, viewport: &mut ViewportPanel) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let mut inputs = Vec::new();
    ctx.input(|i| {
        // Escape: same as the context action (close polygon / drop selection)
        if i.key_pressed(egui::Key::Escape) {
            inputs.push(Input::Secondary);
        }
        if i.modifiers.command {
            return;
        }
        for (key, control) in [
            (egui::Key::D, Control::Draw),
            (egui::Key::E, Control::Extrude),
            (egui::Key::M, Control::Move),
            (egui::Key::V, Control::EditVertex),
        ] {
            if i.key_pressed(key) {
                inputs.push(Input::Control(control));
            }
        }
        // Home: reset the camera
        if i.key_pressed(egui::Key::Home) {
            viewport.reset_camera();
        }
    });

    for input in inputs {
        editor.handle(input);
    }
}
