//! Application menu bar

use eframe::egui;

use crate::editor::Editor;
use crate::viewport::ViewportPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, editor: &mut Editor) {
    ui.menu_button("File", |ui| {
        if ui.button("New").clicked() {
            *editor = Editor::new(editor.settings().clone());
            tracing::info!("Started a new session");
            ui.close_menu();
        }
        if ui.button("Save settings").clicked() {
            editor.settings().save();
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Quit").clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, viewport: &mut ViewportPanel) {
    ui.menu_button("View", |ui| {
        if ui.button("Reset camera").clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
    });
}
