//! One editing session: state, scene and the sync between them

use glam::Vec3;

use crate::controller::{dispatch, Effect};
use crate::input::{resolve, Input};
use crate::scene::Scene;
use crate::state::{Controls, EditorSettings, EditorState, Mode, ShapeStore};
use crate::sync::VisualSync;

pub struct Editor {
    state: EditorState,
    scene: Scene,
    sync: VisualSync,
}

impl Editor {
    pub fn new(settings: EditorSettings) -> Self {
        let scene = Scene::new(&settings.ground);
        Self {
            state: EditorState::new(settings),
            scene,
            sync: VisualSync::default(),
        }
    }

    /// Resolve picks, run the state machine, then bring the scene up to date
    /// before the next input is accepted.
    pub fn handle(&mut self, input: Input) -> Vec<Effect> {
        let event = resolve(
            &self.scene,
            &self.state.mode,
            input,
            self.state.settings.vertex_probe_length,
        );
        let effects = dispatch(&mut self.state, event);
        self.sync.apply(&effects, &self.state, &mut self.scene);
        effects
    }

    pub fn controls(&self) -> Controls {
        self.state.controls()
    }

    pub fn mode(&self) -> &Mode {
        &self.state.mode
    }

    /// Unfinished drawing waiting for the next Draw
    pub fn draft(&self) -> &[Vec3] {
        &self.state.draft
    }

    pub fn shapes(&self) -> &ShapeStore {
        &self.state.shapes
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.state.settings
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn sync(&self) -> &VisualSync {
        &self.sync
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Control, ModeKind};
    use crate::viewport::picking::Ray;
    use shared::PrimitiveTag;

    #[test]
    fn test_draw_through_picking() {
        let mut editor = Editor::default();
        editor.handle(Input::Control(Control::Draw));
        for (x, z) in [(0.0, 0.0), (0.5, 0.0), (0.5, 0.5)] {
            editor.handle(Input::PrimaryClick(Ray::down_at(x, z)));
        }
        editor.handle(Input::Secondary);

        assert_eq!(editor.mode().kind(), ModeKind::Idle);
        assert_eq!(editor.shapes().polygon_count(), 1);
        assert!(editor.controls().extrude);
        assert_eq!(editor.scene().count_where(|t| t.is_marker()), 3);
        assert!(editor.sync().primitive(PrimitiveTag::Line { shape: 0 }).is_some());
    }

    #[test]
    fn test_click_outside_ground_adds_nothing() {
        let mut editor = Editor::default();
        editor.handle(Input::Control(Control::Draw));
        let effects = editor.handle(Input::PrimaryClick(Ray::down_at(3.0, 0.0)));
        assert!(effects.is_empty());
        assert!(editor.mode().draw_buffer().is_empty());
    }
}
