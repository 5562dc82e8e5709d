//! Headless harness driving an [`Editor`] with ground coordinates.
//!
//! Clicks and pointer moves are issued as vertical rays, so everything goes
//! through the same pick -> dispatch -> sync path as the desktop viewport.

use glam::Vec3;
use shared::{MarkerKey, PrimitiveTag, ShapeIndex};

use crate::controller::Effect;
use crate::editor::Editor;
use crate::input::Input;
use crate::scene::PrimitiveShape;
use crate::state::{Control, EditorSettings, ModeKind};
use crate::viewport::picking::Ray;

const TOLERANCE: f32 = 1e-4;

pub struct EditorHarness {
    pub editor: Editor,
}

impl Default for EditorHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorHarness {
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            editor: Editor::new(settings),
        }
    }

    // ── Controls ──────────────────────────────────────────────

    pub fn enter_draw(&mut self) -> Vec<Effect> {
        self.editor.handle(Input::Control(Control::Draw))
    }

    pub fn extrude(&mut self) -> Vec<Effect> {
        self.editor.handle(Input::Control(Control::Extrude))
    }

    pub fn enter_move(&mut self) -> Vec<Effect> {
        self.editor.handle(Input::Control(Control::Move))
    }

    pub fn enter_vertex_edit(&mut self) -> Vec<Effect> {
        self.editor.handle(Input::Control(Control::EditVertex))
    }

    // ── Pointer ───────────────────────────────────────────────

    /// Primary click straight above ground position (x, z)
    pub fn click(&mut self, x: f32, z: f32) -> Vec<Effect> {
        self.editor.handle(Input::PrimaryClick(Ray::down_at(x, z)))
    }

    pub fn secondary(&mut self) -> Vec<Effect> {
        self.editor.handle(Input::Secondary)
    }

    pub fn move_pointer(&mut self, x: f32, z: f32) -> Vec<Effect> {
        self.editor.handle(Input::PointerMove(Ray::down_at(x, z)))
    }

    /// Draw mode, one click per point, then finalize
    pub fn draw_polygon(&mut self, points: &[(f32, f32)]) {
        self.enter_draw();
        for &(x, z) in points {
            self.click(x, z);
        }
        self.secondary();
    }

    /// Move mode: grab at `from`, drag to `to`, release
    pub fn drag_solid(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.enter_move();
        self.click(from.0, from.1);
        self.move_pointer(to.0, to.1);
        self.secondary();
    }

    /// Vertex-edit mode: grab at `from`, drag to `to`, release
    pub fn drag_vertex(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.enter_vertex_edit();
        self.click(from.0, from.1);
        self.move_pointer(to.0, to.1);
        self.secondary();
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn mode(&self) -> ModeKind {
        self.editor.mode().kind()
    }

    pub fn polygon_count(&self) -> usize {
        self.editor.shapes().polygon_count()
    }

    pub fn solid_count(&self) -> usize {
        self.editor.shapes().solid_count()
    }

    /// Closed point loop of a polygon
    pub fn point_loop(&self, shape: ShapeIndex) -> Option<Vec<Vec3>> {
        self.editor.shapes().polygon(shape).map(|p| p.point_loop())
    }

    /// World footprint of a shape's solid
    pub fn footprint(&self, shape: ShapeIndex) -> Option<Vec<Vec3>> {
        self.editor.shapes().solid_for_shape(shape).map(|s| s.footprint())
    }

    /// Points of a drawing left open by a short secondary action
    pub fn draft(&self) -> &[Vec3] {
        self.editor.draft()
    }

    pub fn solid_position(&self, shape: ShapeIndex) -> Option<Vec3> {
        self.editor.shapes().solid_for_shape(shape).map(|s| s.position)
    }

    pub fn marker_positions(&self, shape: ShapeIndex) -> Vec<Vec3> {
        self.editor
            .shapes()
            .markers_for(shape)
            .map(|(_, m)| m.position)
            .collect()
    }

    /// Live scene primitives of one kind ("ground", "marker", "line", "solid")
    pub fn primitive_count(&self, kind: &str) -> usize {
        self.editor.scene().count_where(|t| t.kind_name() == kind)
    }

    /// Primitive shape registered for a tag
    pub fn primitive(&self, tag: PrimitiveTag) -> Option<&PrimitiveShape> {
        let id = self.editor.sync().primitive(tag)?;
        self.editor.scene().get(id).map(|p| &p.shape)
    }

    /// Cross-check store, registry and scene. Returns one message per
    /// violation; empty means consistent.
    pub fn check_invariants(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let shapes = self.editor.shapes();
        let scene = self.editor.scene();
        let sync = self.editor.sync();

        for (shape, polygon) in shapes.polygons().iter().enumerate() {
            if shapes.marker_count_for(shape) != polygon.len() {
                problems.push(format!(
                    "shape {shape}: {} markers for {} points",
                    shapes.marker_count_for(shape),
                    polygon.len()
                ));
            }
            for (vertex, point) in polygon.points().iter().enumerate() {
                let key = MarkerKey::new(shape, vertex);
                match shapes.marker(key) {
                    Some(m) if m.position.distance(*point) < TOLERANCE => {}
                    Some(m) => problems.push(format!("marker {key:?} at {} but point at {point}", m.position)),
                    None => problems.push(format!("marker {key:?} missing")),
                }
                match self.primitive(PrimitiveTag::marker(key)) {
                    Some(PrimitiveShape::Marker { position, .. }) if position.distance(*point) < TOLERANCE => {}
                    other => problems.push(format!("marker primitive {key:?} out of sync: {other:?}")),
                }
            }

            match self.primitive(PrimitiveTag::Line { shape }) {
                Some(PrimitiveShape::LineLoop { points }) if same_points(points, &polygon.point_loop()) => {}
                other => problems.push(format!("line of shape {shape} out of sync: {other:?}")),
            }

            if let Some(solid) = shapes.solid_for_shape(shape) {
                if !same_points(&solid.footprint(), polygon.points()) {
                    problems.push(format!("solid footprint of shape {shape} differs from polygon"));
                }
                if (solid.position.y - solid.depth).abs() > TOLERANCE {
                    problems.push(format!("solid of shape {shape} not resting on the ground"));
                }
                match self.primitive(PrimitiveTag::Solid { shape }) {
                    Some(PrimitiveShape::Solid { position, style, .. }) => {
                        if position.distance(solid.position) > TOLERANCE || *style != solid.style {
                            problems.push(format!("solid primitive of shape {shape} out of sync"));
                        }
                    }
                    other => problems.push(format!("solid of shape {shape} has no primitive: {other:?}")),
                }
            }
        }

        // Markers of the drawing in progress (or left open) use the next index
        let open_points = match self.editor.mode().draw_buffer() {
            [] => self.editor.draft(),
            buffer => buffer,
        };
        let next = shapes.next_shape();
        if shapes.marker_count_for(next) != open_points.len() {
            problems.push(format!(
                "{} markers for {} unfinished points",
                shapes.marker_count_for(next),
                open_points.len()
            ));
        }

        for (tag, id) in sync.registered() {
            match scene.get(id) {
                Some(p) if p.tag == tag => {}
                _ => problems.push(format!("{tag:?} registered as stale {id:?}")),
            }
        }
        for (id, primitive) in scene.iter() {
            if primitive.tag != PrimitiveTag::Ground && sync.primitive(primitive.tag) != Some(id) {
                problems.push(format!("orphan primitive {id:?} tagged {:?}", primitive.tag));
            }
        }
        problems
    }
}

fn same_points(a: &[Vec3], b: &[Vec3]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(p, q)| p.distance(*q) < TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_harness_is_consistent() {
        let h = EditorHarness::new();
        assert!(h.check_invariants().is_empty());
        assert_eq!(h.primitive_count("ground"), 1);
        assert_eq!(h.mode(), ModeKind::Idle);
    }

    #[test]
    fn test_draw_polygon_helper() {
        let mut h = EditorHarness::new();
        h.draw_polygon(&[(0.0, 0.0), (0.5, 0.0), (0.5, 0.5)]);
        assert_eq!(h.polygon_count(), 1);
        assert_eq!(h.marker_positions(0).len(), 3);
        assert!(h.check_invariants().is_empty(), "{:?}", h.check_invariants());
    }

    #[test]
    fn test_markers_of_drawing_in_progress_are_not_flagged() {
        let mut h = EditorHarness::new();
        h.enter_draw();
        h.click(0.1, 0.1);
        // In-progress markers are registered, so nothing is orphaned
        assert!(h.check_invariants().is_empty(), "{:?}", h.check_invariants());
    }
}
