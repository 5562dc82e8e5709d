//! 3D viewport panel

mod camera;
pub use footprint_lib::viewport::picking;
mod renderer;

use egui::Ui;

use crate::editor::Editor;
use crate::input::Input;
use camera::ArcBallCamera;

/// 3D viewport: camera controls plus pointer input for the editor
pub struct ViewportPanel {
    camera: ArcBallCamera,
    /// Last pointer position forwarded as a move
    last_pointer: Option<egui::Pos2>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: ArcBallCamera::new(),
            last_pointer: None,
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = ArcBallCamera::new();
    }

    pub fn show(&mut self, ui: &mut Ui, editor: &mut Editor) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        // ── Camera controls ───────────────────────────────────
        let alt = ui.input(|i| i.modifiers.alt);
        let orbiting = response.dragged_by(egui::PointerButton::Middle)
            || (response.dragged_by(egui::PointerButton::Primary) && alt);
        let panning = response.dragged_by(egui::PointerButton::Secondary);

        if orbiting {
            let delta = response.drag_delta();
            self.camera.rotate(delta.x * 0.5, delta.y * 0.5);
        }
        if panning {
            let delta = response.drag_delta();
            self.camera.pan(delta.x * 0.005, delta.y * 0.005);
        }

        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if response.hovered() && scroll.abs() > 0.1 {
            self.camera.zoom(scroll * 0.01);
        }

        // ── Editor input ──────────────────────────────────────
        let press_pos = response.interact_pointer_pos();
        let grabbed_by_drag = response.drag_started_by(egui::PointerButton::Primary) && !alt;
        if response.clicked_by(egui::PointerButton::Primary) || grabbed_by_drag {
            if let Some(pos) = press_pos {
                editor.handle(Input::PrimaryClick(self.camera.screen_ray(pos, rect)));
            }
        }
        if response.clicked_by(egui::PointerButton::Secondary) {
            editor.handle(Input::Secondary);
        }

        let pointer = response.hover_pos().or(press_pos);
        if !orbiting && !panning && pointer != self.last_pointer {
            if let Some(pos) = pointer {
                editor.handle(Input::PointerMove(self.camera.screen_ray(pos, rect)));
            }
        }
        self.last_pointer = pointer;

        if ui.is_rect_visible(rect) {
            renderer::paint_viewport(ui, rect, &self.camera, editor);
        }
    }
}
