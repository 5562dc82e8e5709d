//! Editor mode and the toolbar controls derived from it

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::selection::{SolidGrab, VertexGrab};
use super::shapes::ShapeStore;

/// Interaction mode with its mode-specific payload
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Mode {
    #[default]
    Idle,
    /// Collecting points for a new polygon
    Draw { buffer: Vec<Vec3> },
    /// Translating whole shapes
    Move { grab: Option<SolidGrab> },
    /// Dragging single vertices
    VertexEdit { grab: Option<VertexGrab> },
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Idle => ModeKind::Idle,
            Mode::Draw { .. } => ModeKind::Draw,
            Mode::Move { .. } => ModeKind::Move,
            Mode::VertexEdit { .. } => ModeKind::VertexEdit,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Mode::Idle)
    }

    /// Points collected so far while drawing
    pub fn draw_buffer(&self) -> &[Vec3] {
        match self {
            Mode::Draw { buffer } => buffer,
            _ => &[],
        }
    }

    pub fn solid_grab(&self) -> Option<&SolidGrab> {
        match self {
            Mode::Move { grab } => grab.as_ref(),
            _ => None,
        }
    }

    pub fn vertex_grab(&self) -> Option<&VertexGrab> {
        match self {
            Mode::VertexEdit { grab } => grab.as_ref(),
            _ => None,
        }
    }
}

/// Payload-free mode discriminant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    Idle,
    Draw,
    Move,
    VertexEdit,
}

impl ModeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ModeKind::Idle => "Idle",
            ModeKind::Draw => "Draw",
            ModeKind::Move => "Move",
            ModeKind::VertexEdit => "Edit Vertex",
        }
    }
}

/// Toolbar trigger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Draw,
    Extrude,
    Move,
    EditVertex,
}

impl Control {
    pub const ALL: [Control; 4] = [Control::Draw, Control::Extrude, Control::Move, Control::EditVertex];

    pub fn label(&self) -> &'static str {
        match self {
            Control::Draw => "Draw",
            Control::Extrude => "Extrude",
            Control::Move => "Move",
            Control::EditVertex => "Edit Vertex",
        }
    }
}

/// Enabled state of every toolbar control
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub draw: bool,
    pub extrude: bool,
    pub move_shape: bool,
    pub edit_vertex: bool,
}

impl Controls {
    /// Mode entry is only possible from idle; extrude additionally needs a
    /// finalized polygon without a solid.
    pub fn for_state(mode: &Mode, shapes: &ShapeStore) -> Self {
        let idle = mode.is_idle();
        Self {
            draw: idle,
            extrude: idle && !shapes.pending_extrusion().is_empty(),
            move_shape: idle,
            edit_vertex: idle,
        }
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        match control {
            Control::Draw => self.draw,
            Control::Extrude => self.extrude,
            Control::Move => self.move_shape,
            Control::EditVertex => self.edit_vertex,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_idle_enables_mode_entry() {
        let shapes = ShapeStore::default();
        let idle = Controls::for_state(&Mode::Idle, &shapes);
        assert!(idle.draw && idle.move_shape && idle.edit_vertex);
        assert!(!idle.extrude);

        for mode in [
            Mode::Draw { buffer: vec![] },
            Mode::Move { grab: None },
            Mode::VertexEdit { grab: None },
        ] {
            let c = Controls::for_state(&mode, &shapes);
            for control in Control::ALL {
                assert!(!c.is_enabled(control), "{control:?} enabled in {:?}", mode.kind());
            }
        }
    }

    #[test]
    fn test_extrude_needs_pending_polygon() {
        let mut shapes = ShapeStore::default();
        shapes.append_polygon(vec![Vec3::ZERO, Vec3::X, Vec3::Z]);
        assert!(Controls::for_state(&Mode::Idle, &shapes).extrude);
        assert!(!Controls::for_state(&Mode::Draw { buffer: vec![] }, &shapes).extrude);
    }

    #[test]
    fn test_mode_accessors() {
        let mode = Mode::Draw {
            buffer: vec![Vec3::X],
        };
        assert_eq!(mode.kind(), ModeKind::Draw);
        assert_eq!(mode.draw_buffer(), &[Vec3::X]);
        assert!(mode.solid_grab().is_none());
        assert!(Mode::Idle.draw_buffer().is_empty());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ModeKind::VertexEdit).unwrap();
        assert_eq!(json, r#""vertex_edit""#);
    }
}
