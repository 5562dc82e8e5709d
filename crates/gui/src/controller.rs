//! Mode state machine.
//!
//! [`dispatch`] consumes one pick-resolved [`Event`], mutates the shape store
//! and mode, and returns the visual work as a list of [`Effect`]s. It never
//! touches the scene, so every transition can be tested without one.

use glam::Vec3;
use shared::{ExtrudedSolid, MarkerKey, ShapeIndex};

use crate::state::{Control, EditorState, Mode, ShapeStore, SolidGrab, VertexGrab};

/// Fewest distinct points a polygon can be finalized with
pub const MIN_POLYGON_POINTS: usize = 3;

/// Planar distance below which two clicked points count as the same point
pub const DISTINCT_POINT_TOLERANCE: f32 = 1e-5;

/// What the pointer was over when an event fired
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    /// Ground position under the pointer (elevation 0)
    pub ground: Option<Vec3>,
    /// Shape whose solid is under the pointer
    pub solid: Option<ShapeIndex>,
    /// Vertex marker under the pointer, directly or below a solid
    pub vertex: Option<MarkerKey>,
}

impl PointerSample {
    pub fn on_ground(ground: Vec3) -> Self {
        Self {
            ground: Some(ground),
            ..Self::default()
        }
    }

    pub fn with_solid(mut self, shape: ShapeIndex) -> Self {
        self.solid = Some(shape);
        self
    }

    pub fn with_vertex(mut self, key: MarkerKey) -> Self {
        self.vertex = Some(key);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Toolbar control pressed
    Activate(Control),
    PrimaryClick(PointerSample),
    /// Complete / cancel (context action)
    Secondary,
    PointerMove { ground: Option<Vec3> },
}

/// Visual work requested by a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    CreateMarker(MarkerKey),
    MoveMarker(MarkerKey),
    /// Dispose and recreate the line loop of a shape
    RebuildLine(ShapeIndex),
    /// Dispose and recreate the solid of a shape
    RebuildSolid(ShapeIndex),
    /// Solid mesh unchanged, only its position
    PlaceSolid(ShapeIndex),
    RestyleSolid(ShapeIndex),
}

/// Run one event through the state machine
pub fn dispatch(state: &mut EditorState, event: Event) -> Vec<Effect> {
    let mut effects = Vec::new();
    match event {
        Event::Activate(control) => activate(state, control, &mut effects),
        Event::PrimaryClick(sample) => primary_click(state, sample, &mut effects),
        Event::Secondary => secondary(state, &mut effects),
        Event::PointerMove { ground } => {
            if let Some(ground) = ground {
                pointer_move(state, ground, &mut effects);
            }
        }
    }
    effects
}

// ── Controls ──────────────────────────────────────────────

fn activate(state: &mut EditorState, control: Control, effects: &mut Vec<Effect>) {
    if !state.controls().is_enabled(control) {
        tracing::debug!("Ignoring disabled control '{}'", control.label());
        return;
    }
    match control {
        Control::Draw => {
            let buffer = std::mem::take(&mut state.draft);
            if !buffer.is_empty() {
                tracing::debug!(points = buffer.len(), "Resuming unfinished drawing");
            }
            enter(state, Mode::Draw { buffer });
        }
        Control::Move => enter(state, Mode::Move { grab: None }),
        Control::EditVertex => enter(state, Mode::VertexEdit { grab: None }),
        Control::Extrude => extrude_pending(state, effects),
    }
}

fn enter(state: &mut EditorState, mode: Mode) {
    tracing::info!("Entered {} mode", mode.kind().label());
    state.mode = mode;
}

fn extrude_pending(state: &mut EditorState, effects: &mut Vec<Effect>) {
    let depth = state.settings.extrusion_depth;
    let style = state.settings.solid_style();
    let pending = state.shapes.pending_extrusion();

    for &shape in &pending {
        let Some(points) = state.shapes.polygon(shape).map(|p| p.points().to_vec()) else {
            continue;
        };
        state
            .shapes
            .append_solid(ExtrudedSolid::new(shape, points, depth, style));
        effects.push(Effect::RebuildSolid(shape));
    }
    tracing::info!(count = pending.len(), depth, "Extruded pending polygons");
}

// ── Pointer ───────────────────────────────────────────────

fn primary_click(state: &mut EditorState, sample: PointerSample, effects: &mut Vec<Effect>) {
    let EditorState { mode, shapes, .. } = state;
    match mode {
        Mode::Idle => {}
        Mode::Draw { buffer } => {
            let Some(point) = sample.ground else {
                tracing::debug!("Draw click missed the ground");
                return;
            };
            let key = MarkerKey::new(shapes.next_shape(), buffer.len());
            buffer.push(point);
            shapes.set_marker(key, point);
            effects.push(Effect::CreateMarker(key));
        }
        Mode::Move { grab } => {
            let (Some(shape), Some(ground)) = (sample.solid, sample.ground) else {
                tracing::debug!("Move click hit no solid");
                return;
            };
            if let Some(previous) = grab.take() {
                if previous.shape != shape {
                    set_highlight(shapes, previous.shape, false, effects);
                }
            }
            *grab = Some(SolidGrab::new(shape, ground));
            set_highlight(shapes, shape, true, effects);
            tracing::debug!(shape, "Grabbed solid");
        }
        Mode::VertexEdit { grab } => {
            let (Some(key), Some(ground)) = (sample.vertex, sample.ground) else {
                tracing::debug!("Edit click hit no vertex");
                return;
            };
            if shapes.polygon(key.shape).and_then(|p| p.point(key.vertex)).is_none() {
                tracing::debug!(?key, "Marker has no polygon vertex");
                return;
            }
            *grab = Some(VertexGrab::new(key, ground));
            tracing::debug!(?key, "Grabbed vertex");
        }
    }
}

fn secondary(state: &mut EditorState, effects: &mut Vec<Effect>) {
    match std::mem::take(&mut state.mode) {
        Mode::Idle => {}
        Mode::Draw { buffer } => {
            if let Some(unfinished) = finalize(&mut state.shapes, buffer, effects) {
                state.draft = unfinished;
            }
        }
        Mode::Move { grab } => {
            if let Some(grab) = grab {
                set_highlight(&mut state.shapes, grab.shape, false, effects);
            }
            tracing::info!("Left Move mode");
        }
        Mode::VertexEdit { .. } => tracing::info!("Left Edit Vertex mode"),
    }
}

fn pointer_move(state: &mut EditorState, ground: Vec3, effects: &mut Vec<Effect>) {
    let EditorState { mode, shapes, .. } = state;
    match mode {
        Mode::Move { grab: Some(grab) } => {
            let delta = grab.step(ground);
            if delta != Vec3::ZERO {
                translate_shape(shapes, grab.shape, delta, effects);
            }
        }
        Mode::VertexEdit { grab: Some(grab) } => {
            let delta = grab.step(ground);
            if delta != Vec3::ZERO {
                move_vertex(shapes, grab.key, delta, effects);
            }
        }
        _ => {}
    }
}

// ── Mutations ─────────────────────────────────────────────

/// Commit the buffer as a polygon. A buffer with too few distinct points is
/// handed back untouched, markers included.
fn finalize(shapes: &mut ShapeStore, buffer: Vec<Vec3>, effects: &mut Vec<Effect>) -> Option<Vec<Vec3>> {
    let distinct = distinct_points(&buffer);
    if distinct < MIN_POLYGON_POINTS {
        tracing::debug!(
            points = buffer.len(),
            distinct,
            "Drawing kept open: a polygon needs at least {MIN_POLYGON_POINTS} distinct points"
        );
        return Some(buffer);
    }
    let points = buffer.len();
    let shape = shapes.append_polygon(buffer);
    tracing::info!(shape, points, "Polygon finalized");
    effects.push(Effect::RebuildLine(shape));
    None
}

/// Number of points not within tolerance of an earlier one
fn distinct_points(points: &[Vec3]) -> usize {
    points
        .iter()
        .enumerate()
        .filter(|(i, p)| {
            points[..*i]
                .iter()
                .all(|q| q.distance(**p) > DISTINCT_POINT_TOLERANCE)
        })
        .count()
}

fn translate_shape(shapes: &mut ShapeStore, shape: ShapeIndex, delta: Vec3, effects: &mut Vec<Effect>) {
    if !shapes.translate_polygon(shape, delta) {
        return;
    }
    if let Some(solid) = shapes.solid_for_shape_mut(shape) {
        solid.translate(delta);
        effects.push(Effect::PlaceSolid(shape));
    }
    effects.push(Effect::RebuildLine(shape));
    effects.extend(
        shapes
            .translate_markers(shape, delta)
            .into_iter()
            .map(Effect::MoveMarker),
    );
}

fn move_vertex(shapes: &mut ShapeStore, key: MarkerKey, delta: Vec3, effects: &mut Vec<Effect>) {
    let Some(current) = shapes.polygon(key.shape).and_then(|p| p.point(key.vertex)) else {
        return;
    };
    let target = current + delta;
    shapes.update_point(key.shape, key.vertex, target);
    shapes.set_marker(key, target);
    effects.push(Effect::MoveMarker(key));
    effects.push(Effect::RebuildLine(key.shape));

    let points = shapes
        .polygon(key.shape)
        .map(|p| p.points().to_vec())
        .unwrap_or_default();
    if let Some(solid) = shapes.solid_for_shape_mut(key.shape) {
        solid.rebuild_from(points);
        effects.push(Effect::RebuildSolid(key.shape));
    }
}

fn set_highlight(shapes: &mut ShapeStore, shape: ShapeIndex, on: bool, effects: &mut Vec<Effect>) {
    if let Some(solid) = shapes.solid_for_shape_mut(shape) {
        if solid.style.highlighted != on {
            solid.style.highlighted = on;
            effects.push(Effect::RestyleSolid(shape));
        }
    }
}
