//! In-memory scene graph: tagged primitives plus ray picking against them.
//!
//! The editor only talks to the [`Picker`] and [`SceneGraph`] traits; [`Scene`]
//! is the implementation the viewport paints from.

use std::collections::BTreeMap;

use glam::Vec3;
use shared::{PrimitiveTag, SolidStyle};

use crate::geometry::{EarcutExtruder, GeometryError, GeometryProvider, SolidGeometry};
use crate::state::settings::GroundSettings;
use crate::viewport::picking::{pick_triangle, ray_ground, ray_sphere, Ray};

/// Handle of a primitive owned by a scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveRef(u64);

/// Geometry of a scene primitive
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveShape {
    /// Finite ground rectangle centred on the origin
    Ground {
        width: f32,
        depth: f32,
        subdivisions: u32,
    },
    /// Sphere marking a vertex
    Marker { position: Vec3, radius: f32 },
    /// Closed polyline; the points already include the closing duplicate
    LineLoop { points: Vec<Vec3> },
    /// Prism mesh placed at `position`
    Solid {
        geometry: SolidGeometry,
        position: Vec3,
        style: SolidStyle,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScenePrimitive {
    pub tag: PrimitiveTag,
    pub shape: PrimitiveShape,
}

/// Result of a successful pick or ray cast
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub point: Vec3,
    pub tag: PrimitiveTag,
    pub distance: f32,
}

/// Which primitives a pick may hit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickFilter {
    All,
    Ground,
    Solids,
}

impl PickFilter {
    /// Line loops are never pickable
    pub fn accepts(&self, tag: &PrimitiveTag) -> bool {
        match (self, tag) {
            (_, PrimitiveTag::Line { .. }) => false,
            (PickFilter::All, _) => true,
            (PickFilter::Ground, PrimitiveTag::Ground) => true,
            (PickFilter::Solids, PrimitiveTag::Solid { .. }) => true,
            _ => false,
        }
    }
}

/// Ray queries against the scene
pub trait Picker {
    /// Nearest hit along `ray` among primitives accepted by `filter`
    fn pick(&self, ray: &Ray, filter: PickFilter) -> Option<PickHit>;

    /// Every hit within `length` of `origin`, nearest first
    fn cast_ray(&self, origin: Vec3, direction: Vec3, length: f32) -> Vec<PickHit>;
}

/// Mutable collection of visual primitives
pub trait SceneGraph {
    fn create_point_marker(&mut self, tag: PrimitiveTag, position: Vec3, diameter: f32) -> PrimitiveRef;

    fn create_line_loop(&mut self, tag: PrimitiveTag, points: &[Vec3]) -> PrimitiveRef;

    /// Extrude `footprint` into a prism spanning `-depth..0` in local space
    fn create_solid(
        &mut self,
        tag: PrimitiveTag,
        footprint: &[Vec3],
        depth: f32,
    ) -> Result<PrimitiveRef, GeometryError>;

    /// Reposition a marker or solid. False for unknown ids and other kinds.
    fn set_position(&mut self, id: PrimitiveRef, position: Vec3) -> bool;

    fn set_solid_style(&mut self, id: PrimitiveRef, style: SolidStyle) -> bool;

    /// Release a primitive. False when the id is not (or no longer) known.
    fn dispose(&mut self, id: PrimitiveRef) -> bool;
}

pub struct Scene {
    primitives: BTreeMap<PrimitiveRef, ScenePrimitive>,
    next_id: u64,
    geometry: Box<dyn GeometryProvider>,
}

impl Scene {
    /// Scene holding only the ground, extruding with earcut
    pub fn new(ground: &GroundSettings) -> Self {
        Self::with_geometry(ground, Box::new(EarcutExtruder))
    }

    pub fn with_geometry(ground: &GroundSettings, geometry: Box<dyn GeometryProvider>) -> Self {
        let mut scene = Self {
            primitives: BTreeMap::new(),
            next_id: 1,
            geometry,
        };
        scene.insert(
            PrimitiveTag::Ground,
            PrimitiveShape::Ground {
                width: ground.width,
                depth: ground.depth,
                subdivisions: ground.subdivisions,
            },
        );
        scene
    }

    fn insert(&mut self, tag: PrimitiveTag, shape: PrimitiveShape) -> PrimitiveRef {
        let id = PrimitiveRef(self.next_id);
        self.next_id += 1;
        self.primitives.insert(id, ScenePrimitive { tag, shape });
        id
    }

    pub fn get(&self, id: PrimitiveRef) -> Option<&ScenePrimitive> {
        self.primitives.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveRef, &ScenePrimitive)> {
        self.primitives.iter().map(|(id, p)| (*id, p))
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Number of live primitives whose tag satisfies `pred`
    pub fn count_where(&self, pred: impl Fn(&PrimitiveTag) -> bool) -> usize {
        self.primitives.values().filter(|p| pred(&p.tag)).count()
    }

    /// Live primitives carrying `tag` (more than one indicates a leak)
    pub fn find_tag(&self, tag: PrimitiveTag) -> Vec<PrimitiveRef> {
        self.primitives
            .iter()
            .filter(|(_, p)| p.tag == tag)
            .map(|(id, _)| *id)
            .collect()
    }

    fn intersect(ray: &Ray, primitive: &ScenePrimitive) -> Option<f32> {
        match &primitive.shape {
            PrimitiveShape::Ground { width, depth, .. } => ray_ground(ray, *width, *depth),
            PrimitiveShape::Marker { position, radius } => ray_sphere(ray, *position, *radius),
            PrimitiveShape::LineLoop { .. } => None,
            PrimitiveShape::Solid {
                geometry, position, ..
            } => pick_triangle(ray, &geometry.mesh, *position).map(|hit| hit.distance),
        }
    }

    fn hits<'a>(&'a self, ray: &'a Ray, filter: PickFilter) -> impl Iterator<Item = PickHit> + 'a {
        self.primitives
            .values()
            .filter(move |p| filter.accepts(&p.tag))
            .filter_map(move |p| {
                Self::intersect(ray, p).map(|distance| PickHit {
                    point: ray.at(distance),
                    tag: p.tag,
                    distance,
                })
            })
    }
}

impl Picker for Scene {
    fn pick(&self, ray: &Ray, filter: PickFilter) -> Option<PickHit> {
        self.hits(ray, filter)
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn cast_ray(&self, origin: Vec3, direction: Vec3, length: f32) -> Vec<PickHit> {
        let ray = Ray::new(origin, direction);
        let mut hits: Vec<PickHit> = self
            .hits(&ray, PickFilter::All)
            .filter(|h| h.distance <= length)
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

impl SceneGraph for Scene {
    fn create_point_marker(&mut self, tag: PrimitiveTag, position: Vec3, diameter: f32) -> PrimitiveRef {
        self.insert(
            tag,
            PrimitiveShape::Marker {
                position,
                radius: diameter * 0.5,
            },
        )
    }

    fn create_line_loop(&mut self, tag: PrimitiveTag, points: &[Vec3]) -> PrimitiveRef {
        self.insert(
            tag,
            PrimitiveShape::LineLoop {
                points: points.to_vec(),
            },
        )
    }

    fn create_solid(
        &mut self,
        tag: PrimitiveTag,
        footprint: &[Vec3],
        depth: f32,
    ) -> Result<PrimitiveRef, GeometryError> {
        let geometry = self.geometry.extrude_polygon(footprint, depth)?;
        Ok(self.insert(
            tag,
            PrimitiveShape::Solid {
                geometry,
                position: Vec3::ZERO,
                style: SolidStyle::default(),
            },
        ))
    }

    fn set_position(&mut self, id: PrimitiveRef, new_position: Vec3) -> bool {
        match self.primitives.get_mut(&id).map(|p| &mut p.shape) {
            Some(PrimitiveShape::Marker { position, .. }) | Some(PrimitiveShape::Solid { position, .. }) => {
                *position = new_position;
                true
            }
            _ => false,
        }
    }

    fn set_solid_style(&mut self, id: PrimitiveRef, new_style: SolidStyle) -> bool {
        match self.primitives.get_mut(&id).map(|p| &mut p.shape) {
            Some(PrimitiveShape::Solid { style, .. }) => {
                *style = new_style;
                true
            }
            _ => false,
        }
    }

    fn dispose(&mut self, id: PrimitiveRef) -> bool {
        self.primitives.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(&GroundSettings::default())
    }

    fn unit_square() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.5),
            Vec3::new(0.0, 0.0, 0.5),
        ]
    }

    #[test]
    fn test_new_scene_has_ground() {
        let s = scene();
        assert_eq!(s.len(), 1);
        assert_eq!(s.find_tag(PrimitiveTag::Ground).len(), 1);
    }

    #[test]
    fn test_pick_ground() {
        let s = scene();
        let hit = s.pick(&Ray::down_at(0.3, -0.4), PickFilter::Ground).unwrap();
        assert_eq!(hit.tag, PrimitiveTag::Ground);
        assert!((hit.point - Vec3::new(0.3, 0.0, -0.4)).length() < 1e-5);
        assert!(s.pick(&Ray::down_at(3.0, 0.0), PickFilter::Ground).is_none());
    }

    #[test]
    fn test_pick_prefers_nearest() {
        let mut s = scene();
        let tag = PrimitiveTag::Solid { shape: 0 };
        let id = s.create_solid(tag, &unit_square(), 0.3).unwrap();
        assert!(s.set_position(id, Vec3::new(0.0, 0.3, 0.0)));

        let hit = s.pick(&Ray::down_at(0.3, 0.1), PickFilter::All).unwrap();
        assert_eq!(hit.tag, tag);
        assert!((hit.point.y - 0.3).abs() < 1e-5);

        let ground = s.pick(&Ray::down_at(0.3, 0.1), PickFilter::Ground).unwrap();
        assert_eq!(ground.tag, PrimitiveTag::Ground);
    }

    #[test]
    fn test_solid_filter_follows_position() {
        let mut s = scene();
        let id = s
            .create_solid(PrimitiveTag::Solid { shape: 0 }, &unit_square(), 0.3)
            .unwrap();
        s.set_position(id, Vec3::new(0.5, 0.3, 0.0));
        assert!(s.pick(&Ray::down_at(0.3, 0.1), PickFilter::Solids).is_none());
        assert!(s.pick(&Ray::down_at(0.8, 0.1), PickFilter::Solids).is_some());
    }

    #[test]
    fn test_lines_are_never_picked() {
        let mut s = scene();
        s.create_line_loop(PrimitiveTag::Line { shape: 0 }, &unit_square());
        let hit = s.pick(&Ray::down_at(0.0, 0.0), PickFilter::All).unwrap();
        assert_eq!(hit.tag, PrimitiveTag::Ground);
    }

    #[test]
    fn test_cast_ray_sorted_and_limited() {
        let mut s = scene();
        let id = s
            .create_solid(PrimitiveTag::Solid { shape: 0 }, &unit_square(), 0.3)
            .unwrap();
        s.set_position(id, Vec3::new(0.0, 0.3, 0.0));
        let marker = PrimitiveTag::Marker { shape: 0, vertex: 0 };
        s.create_point_marker(marker, Vec3::new(0.02, 0.0, 0.01), 0.04);

        let hits = s.cast_ray(Vec3::new(0.02, 1.0, 0.01), Vec3::NEG_Y, 5.0);
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert_eq!(hits[0].tag, PrimitiveTag::Solid { shape: 0 });
        assert!(hits.iter().any(|h| h.tag == marker));

        let short = s.cast_ray(Vec3::new(0.02, 1.0, 0.01), Vec3::NEG_Y, 0.5);
        assert!(short.iter().all(|h| h.distance <= 0.5));
        assert!(!short.iter().any(|h| h.tag == marker));
    }

    #[test]
    fn test_failed_solid_adds_nothing() {
        let mut s = scene();
        let err = s
            .create_solid(PrimitiveTag::Solid { shape: 0 }, &unit_square()[..2], 0.3)
            .unwrap_err();
        assert_eq!(err, GeometryError::TooFewPoints(2));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_dispose() {
        let mut s = scene();
        let id = s.create_point_marker(PrimitiveTag::Marker { shape: 0, vertex: 0 }, Vec3::ZERO, 0.04);
        assert!(s.dispose(id));
        assert!(!s.dispose(id));
        assert!(!s.set_position(id, Vec3::X));
    }

    #[test]
    fn test_style_only_applies_to_solids() {
        let mut s = scene();
        let marker = s.create_point_marker(PrimitiveTag::Marker { shape: 0, vertex: 0 }, Vec3::ZERO, 0.04);
        let style = SolidStyle {
            highlighted: true,
            ..SolidStyle::default()
        };
        assert!(!s.set_solid_style(marker, style));

        let solid = s
            .create_solid(PrimitiveTag::Solid { shape: 0 }, &unit_square(), 0.3)
            .unwrap();
        assert!(s.set_solid_style(solid, style));
        match &s.get(solid).unwrap().shape {
            PrimitiveShape::Solid { style, .. } => assert!(style.highlighted),
            other => panic!("unexpected shape {other:?}"),
        }
    }
}
