//! Shape store: polygons, their extruded solids and the vertex marker registry.
//!
//! A plain data container. The only rule it knows about is that polygon and
//! solid indices are never reused; everything else is enforced by the controller.

use std::collections::BTreeMap;

use glam::Vec3;
use shared::{ExtrudedSolid, MarkerKey, Polygon, ShapeIndex, VertexMarker};

#[derive(Debug, Default)]
pub struct ShapeStore {
    polygons: Vec<Polygon>,
    solids: Vec<ExtrudedSolid>,
    markers: BTreeMap<MarkerKey, VertexMarker>,
    /// Monotonically increasing version counter, bumped on every mutation
    version: u64,
}

impl ShapeStore {
    /// Current store version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    // ── Polygons ──────────────────────────────────────────────

    /// Commit a finished polygon and return its index
    pub fn append_polygon(&mut self, points: Vec<Vec3>) -> ShapeIndex {
        self.polygons.push(Polygon::new(points));
        self.version += 1;
        self.polygons.len() - 1
    }

    pub fn polygon(&self, shape: ShapeIndex) -> Option<&Polygon> {
        self.polygons.get(shape)
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Index the next committed polygon will get
    pub fn next_shape(&self) -> ShapeIndex {
        self.polygons.len()
    }

    /// Overwrite one polygon vertex
    pub fn update_point(&mut self, shape: ShapeIndex, vertex: usize, position: Vec3) -> bool {
        let updated = self
            .polygons
            .get_mut(shape)
            .is_some_and(|p| p.set_point(vertex, position));
        if updated {
            self.version += 1;
        }
        updated
    }

    /// Shift every vertex of a polygon
    pub fn translate_polygon(&mut self, shape: ShapeIndex, delta: Vec3) -> bool {
        let Some(polygon) = self.polygons.get_mut(shape) else {
            return false;
        };
        polygon.translate(delta);
        self.version += 1;
        true
    }

    // ── Solids ────────────────────────────────────────────────

    pub fn append_solid(&mut self, solid: ExtrudedSolid) -> usize {
        self.solids.push(solid);
        self.version += 1;
        self.solids.len() - 1
    }

    pub fn solid(&self, index: usize) -> Option<&ExtrudedSolid> {
        self.solids.get(index)
    }

    pub fn solids(&self) -> &[ExtrudedSolid] {
        &self.solids
    }

    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    /// Solid extruded from `shape`, if any
    pub fn solid_for_shape(&self, shape: ShapeIndex) -> Option<&ExtrudedSolid> {
        self.solids.iter().find(|s| s.shape == shape)
    }

    /// Mutable solid of `shape`. Only counts as a mutation when one exists.
    pub fn solid_for_shape_mut(&mut self, shape: ShapeIndex) -> Option<&mut ExtrudedSolid> {
        let solid = self.solids.iter_mut().find(|s| s.shape == shape);
        if solid.is_some() {
            self.version += 1;
        }
        solid
    }

    pub fn is_extruded(&self, shape: ShapeIndex) -> bool {
        self.solid_for_shape(shape).is_some()
    }

    /// Finalized polygons that have no solid yet, in index order
    pub fn pending_extrusion(&self) -> Vec<ShapeIndex> {
        (0..self.polygons.len())
            .filter(|&shape| !self.is_extruded(shape))
            .collect()
    }

    // ── Markers ───────────────────────────────────────────────

    pub fn set_marker(&mut self, key: MarkerKey, position: Vec3) {
        self.markers.insert(key, VertexMarker { position });
        self.version += 1;
    }

    pub fn marker(&self, key: MarkerKey) -> Option<&VertexMarker> {
        self.markers.get(&key)
    }

    /// Markers of one shape, ordered by vertex index
    pub fn markers_for(&self, shape: ShapeIndex) -> impl Iterator<Item = (MarkerKey, &VertexMarker)> {
        self.markers
            .range(MarkerKey::new(shape, 0)..MarkerKey::new(shape + 1, 0))
            .map(|(k, m)| (*k, m))
    }

    pub fn marker_count_for(&self, shape: ShapeIndex) -> usize {
        self.markers_for(shape).count()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Shift every marker of a shape
    pub fn translate_markers(&mut self, shape: ShapeIndex, delta: Vec3) -> Vec<MarkerKey> {
        let keys: Vec<MarkerKey> = self.markers_for(shape).map(|(k, _)| k).collect();
        for key in &keys {
            if let Some(marker) = self.markers.get_mut(key) {
                marker.position += delta;
            }
        }
        if !keys.is_empty() {
            self.version += 1;
        }
        keys
    }
}
