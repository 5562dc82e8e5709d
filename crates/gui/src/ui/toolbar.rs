//! Mode buttons

use egui::Ui;

use crate::editor::Editor;
use crate::input::Input;
use crate::state::Control;

fn tooltip(control: Control) -> &'static str {
    match control {
        Control::Draw => "Click the ground to add points, right click to close the polygon",
        Control::Extrude => "Turn every closed polygon without a solid into a prism",
        Control::Move => "Click a solid, move the pointer to drag it, right click to finish",
        Control::EditVertex => "Click a vertex, move the pointer to drag it, right click to finish",
    }
}

pub fn show(ui: &mut Ui, editor: &mut Editor) {
    let controls = editor.controls();
    ui.horizontal(|ui| {
        for control in Control::ALL {
            if control == Control::Move {
                ui.separator();
            }
            let button = egui::Button::new(control.label()).min_size(egui::vec2(84.0, 0.0));
            if ui
                .add_enabled(controls.is_enabled(control), button)
                .on_hover_text(tooltip(control))
                .clicked()
            {
                editor.handle(Input::Control(control));
            }
        }
    });
}
