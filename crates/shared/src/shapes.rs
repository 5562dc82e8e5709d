use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::ShapeIndex;

/// Difference between two ground positions, restricted to the x/z plane
pub fn planar_delta(from: Vec3, to: Vec3) -> Vec3 {
    Vec3::new(to.x - from.x, 0.0, to.z - from.z)
}

/// Closed footprint on the ground plane.
///
/// Only the distinct vertices are stored; the closing point of the loop is
/// always derived from the first vertex, so editing vertex 0 keeps the loop
/// closed without extra bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Vec3>,
}

impl Polygon {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Distinct vertices in insertion (edge) order
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, vertex: usize) -> Option<Vec3> {
        self.points.get(vertex).copied()
    }

    /// Vertices with the first one repeated at the end
    pub fn point_loop(&self) -> Vec<Vec3> {
        let mut loop_points = self.points.clone();
        if let Some(first) = self.points.first() {
            loop_points.push(*first);
        }
        loop_points
    }

    /// Overwrite one vertex. Returns false when the index is out of range.
    pub fn set_point(&mut self, vertex: usize, position: Vec3) -> bool {
        match self.points.get_mut(vertex) {
            Some(p) => {
                *p = position;
                true
            }
            None => false,
        }
    }

    pub fn translate(&mut self, delta: Vec3) {
        for p in &mut self.points {
            *p += delta;
        }
    }
}

/// Rendering attributes of an extruded solid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolidStyle {
    /// Flat emissive fill colour (RGB, 0..1)
    pub fill: [f32; 3],
    /// Fill colour while the solid is grabbed
    pub highlight: [f32; 3],
    /// Edge outline colour (RGBA, 0..1)
    pub edge_color: [f32; 4],
    /// Edge outline width in pixels
    pub edge_width: f32,
    pub highlighted: bool,
}

impl SolidStyle {
    /// Fill colour currently in effect
    pub fn current_fill(&self) -> [f32; 3] {
        if self.highlighted {
            self.highlight
        } else {
            self.fill
        }
    }
}

impl Default for SolidStyle {
    fn default() -> Self {
        Self {
            fill: [0.0, 0.5, 0.5],
            highlight: [0.0, 1.0, 0.0],
            edge_color: [0.0, 0.0, 0.0, 1.0],
            edge_width: 1.0,
            highlighted: false,
        }
    }
}

/// Prism derived from exactly one polygon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtrudedSolid {
    /// Source polygon
    pub shape: ShapeIndex,
    /// Extrusion depth (prism height)
    pub depth: f32,
    /// Placement of the mesh: y is the elevation offset, x/z the accumulated move
    pub position: Vec3,
    /// Footprint the current mesh was generated from
    pub built_from: Vec<Vec3>,
    pub style: SolidStyle,
}

impl ExtrudedSolid {
    /// New solid sitting on the ground: the mesh spans `-depth..0` locally and
    /// is lifted by `depth`.
    pub fn new(shape: ShapeIndex, footprint: Vec<Vec3>, depth: f32, style: SolidStyle) -> Self {
        Self {
            shape,
            depth,
            position: Vec3::new(0.0, depth, 0.0),
            built_from: footprint,
            style,
        }
    }

    /// World-space footprint (mesh footprint shifted by the planar offset)
    pub fn footprint(&self) -> Vec<Vec3> {
        let offset = Vec3::new(self.position.x, 0.0, self.position.z);
        self.built_from.iter().map(|p| *p + offset).collect()
    }

    /// Planar offset applied since the mesh was last built
    pub fn planar_offset(&self) -> Vec3 {
        Vec3::new(self.position.x, 0.0, self.position.z)
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += Vec3::new(delta.x, 0.0, delta.z);
    }

    /// Reset to a freshly built mesh for `footprint`
    pub fn rebuild_from(&mut self, footprint: Vec<Vec3>) {
        self.built_from = footprint;
        self.position = Vec3::new(0.0, self.depth, 0.0);
    }
}

/// Visual indicator at a polygon vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexMarker {
    pub position: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Polygon {
        Polygon::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
        ])
    }

    #[test]
    fn test_point_loop_closes_on_first() {
        let poly = triangle();
        let lp = poly.point_loop();
        assert_eq!(lp.len(), 4);
        assert_eq!(lp[0], lp[3]);
    }

    #[test]
    fn test_point_loop_follows_first_vertex_edit() {
        let mut poly = triangle();
        assert!(poly.set_point(0, Vec3::new(-0.5, 0.0, 0.25)));
        let lp = poly.point_loop();
        assert_eq!(lp[3], Vec3::new(-0.5, 0.0, 0.25));
        assert!(!poly.set_point(3, Vec3::ZERO));
    }

    #[test]
    fn test_planar_delta_ignores_elevation() {
        let d = planar_delta(Vec3::new(1.0, 0.3, 1.0), Vec3::new(1.5, 0.0, 0.8));
        assert_eq!(d.y, 0.0);
        assert!((d.x - 0.5).abs() < 1e-6);
        assert!((d.z + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_solid_footprint_tracks_translation() {
        let poly = triangle();
        let mut solid = ExtrudedSolid::new(0, poly.points().to_vec(), 0.3, SolidStyle::default());
        assert_eq!(solid.position, Vec3::new(0.0, 0.3, 0.0));

        solid.translate(Vec3::new(0.5, 7.0, 0.2));
        assert_eq!(solid.position.y, 0.3);
        let fp = solid.footprint();
        assert!((fp[1].x - 1.5).abs() < 1e-6);
        assert!((fp[1].z - 0.2).abs() < 1e-6);

        solid.rebuild_from(fp.clone());
        assert_eq!(solid.planar_offset(), Vec3::ZERO);
        assert_eq!(solid.footprint(), fp);
    }

    #[test]
    fn test_style_highlight_switches_fill() {
        let mut style = SolidStyle::default();
        assert_eq!(style.current_fill(), style.fill);
        style.highlighted = true;
        assert_eq!(style.current_fill(), style.highlight);
    }
}
