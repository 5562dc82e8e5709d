use glam::Vec3;

pub mod mode;
pub mod selection;
pub mod settings;
pub mod shapes;

pub use mode::{Control, Controls, Mode, ModeKind};
pub use selection::{SolidGrab, VertexGrab};
pub use settings::EditorSettings;
pub use shapes::ShapeStore;

/// Everything the controller reads and mutates
#[derive(Debug, Default)]
pub struct EditorState {
    pub mode: Mode,
    pub shapes: ShapeStore,
    pub settings: EditorSettings,
    /// Points of a drawing left open by a secondary action with too few
    /// distinct points. The next Draw continues from here.
    pub draft: Vec<Vec3>,
}

impl EditorState {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            mode: Mode::Idle,
            shapes: ShapeStore::default(),
            settings,
            draft: Vec::new(),
        }
    }

    pub fn controls(&self) -> Controls {
        Controls::for_state(&self.mode, &self.shapes)
    }
}
