//! Keeps scene primitives consistent with the shape store.
//!
//! Line loops and solids are never edited in place: every change disposes the
//! registered primitive and builds a new one from store data.

use std::collections::HashMap;

use shared::{MarkerKey, PrimitiveTag, ShapeIndex};

use crate::controller::Effect;
use crate::scene::{PrimitiveRef, SceneGraph};
use crate::state::EditorState;

#[derive(Debug, Default)]
pub struct VisualSync {
    registry: HashMap<PrimitiveTag, PrimitiveRef>,
}

impl VisualSync {
    /// Primitive currently registered for `tag`
    pub fn primitive(&self, tag: PrimitiveTag) -> Option<PrimitiveRef> {
        self.registry.get(&tag).copied()
    }

    pub fn registered(&self) -> impl Iterator<Item = (PrimitiveTag, PrimitiveRef)> + '_ {
        self.registry.iter().map(|(tag, id)| (*tag, *id))
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Carry out the visual work of one dispatch
    pub fn apply(&mut self, effects: &[Effect], state: &EditorState, scene: &mut impl SceneGraph) {
        for effect in effects {
            match *effect {
                Effect::CreateMarker(key) => self.create_marker(key, state, scene),
                Effect::MoveMarker(key) => self.move_marker(key, state, scene),
                Effect::RebuildLine(shape) => self.rebuild_line(shape, state, scene),
                Effect::RebuildSolid(shape) => self.rebuild_solid(shape, state, scene),
                Effect::PlaceSolid(shape) => self.place_solid(shape, state, scene),
                Effect::RestyleSolid(shape) => self.restyle_solid(shape, state, scene),
            }
        }
    }

    /// Dispose whatever is registered for `tag`, then register what `build`
    /// creates. A failed build leaves the tag unregistered.
    fn replace<S: SceneGraph>(
        &mut self,
        tag: PrimitiveTag,
        scene: &mut S,
        build: impl FnOnce(&mut S) -> Option<PrimitiveRef>,
    ) {
        self.release(tag, scene);
        if let Some(id) = build(scene) {
            self.registry.insert(tag, id);
        }
    }

    fn release(&mut self, tag: PrimitiveTag, scene: &mut impl SceneGraph) {
        if let Some(id) = self.registry.remove(&tag) {
            if !scene.dispose(id) {
                defect(format_args!("{tag:?} was registered as {id:?} but the scene did not know it"));
            }
        }
    }

    fn create_marker(&mut self, key: MarkerKey, state: &EditorState, scene: &mut impl SceneGraph) {
        let Some(marker) = state.shapes.marker(key) else {
            defect(format_args!("no marker data for {key:?}"));
            return;
        };
        let position = marker.position;
        let diameter = state.settings.marker_diameter;
        let tag = PrimitiveTag::marker(key);
        self.replace(tag, scene, |scene| {
            Some(scene.create_point_marker(tag, position, diameter))
        });
    }

    fn move_marker(&mut self, key: MarkerKey, state: &EditorState, scene: &mut impl SceneGraph) {
        let tag = PrimitiveTag::marker(key);
        match (self.primitive(tag), state.shapes.marker(key)) {
            (Some(id), Some(marker)) => {
                if !scene.set_position(id, marker.position) {
                    defect(format_args!("scene rejected position of {tag:?}"));
                }
            }
            _ => defect(format_args!("cannot move unregistered {tag:?}")),
        }
    }

    fn rebuild_line(&mut self, shape: ShapeIndex, state: &EditorState, scene: &mut impl SceneGraph) {
        let Some(polygon) = state.shapes.polygon(shape) else {
            defect(format_args!("line rebuild for missing shape {shape}"));
            return;
        };
        let points = polygon.point_loop();
        let tag = PrimitiveTag::Line { shape };
        self.replace(tag, scene, |scene| Some(scene.create_line_loop(tag, &points)));
    }

    fn rebuild_solid(&mut self, shape: ShapeIndex, state: &EditorState, scene: &mut impl SceneGraph) {
        let Some(solid) = state.shapes.solid_for_shape(shape) else {
            defect(format_args!("solid rebuild for unextruded shape {shape}"));
            return;
        };
        let tag = PrimitiveTag::Solid { shape };
        self.replace(tag, scene, |scene| {
            match scene.create_solid(tag, &solid.built_from, solid.depth) {
                Ok(id) => {
                    scene.set_position(id, solid.position);
                    scene.set_solid_style(id, solid.style);
                    Some(id)
                }
                Err(e) => {
                    tracing::warn!(shape, "Could not build solid: {e}");
                    None
                }
            }
        });
    }

    fn place_solid(&mut self, shape: ShapeIndex, state: &EditorState, scene: &mut impl SceneGraph) {
        let tag = PrimitiveTag::Solid { shape };
        let (Some(id), Some(solid)) = (self.primitive(tag), state.shapes.solid_for_shape(shape)) else {
            // Solids whose geometry failed stay unregistered
            tracing::debug!(shape, "No solid primitive to place");
            return;
        };
        scene.set_position(id, solid.position);
    }

    fn restyle_solid(&mut self, shape: ShapeIndex, state: &EditorState, scene: &mut impl SceneGraph) {
        let tag = PrimitiveTag::Solid { shape };
        let (Some(id), Some(solid)) = (self.primitive(tag), state.shapes.solid_for_shape(shape)) else {
            tracing::debug!(shape, "No solid primitive to restyle");
            return;
        };
        scene.set_solid_style(id, solid.style);
    }
}

/// Broken internal bookkeeping: loud in release, fatal in debug builds
fn defect(message: std::fmt::Arguments) {
    tracing::error!("{message}");
    if cfg!(debug_assertions) {
        panic!("{message}");
    }
}
