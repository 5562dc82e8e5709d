//! Raw pointer input to pick-annotated controller events

use glam::Vec3;
use shared::MarkerKey;

use crate::controller::{Event, PointerSample};
use crate::scene::{PickFilter, Picker};
use crate::state::{Control, Mode};
use crate::viewport::picking::Ray;

/// Input as produced by the toolbar and viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input {
    Control(Control),
    /// Primary button click along a world ray
    PrimaryClick(Ray),
    /// Context action (right click or Escape)
    Secondary,
    PointerMove(Ray),
}

/// Pick whatever the current mode needs and wrap it into an [`Event`]
pub fn resolve(picker: &impl Picker, mode: &Mode, input: Input, probe_length: f32) -> Event {
    match input {
        Input::Control(control) => Event::Activate(control),
        Input::Secondary => Event::Secondary,
        Input::PrimaryClick(ray) => Event::PrimaryClick(sample_pointer(picker, mode, &ray, probe_length)),
        Input::PointerMove(ray) => {
            let dragging = mode.solid_grab().is_some() || mode.vertex_grab().is_some();
            Event::PointerMove {
                ground: if dragging { ground_point(picker, &ray) } else { None },
            }
        }
    }
}

/// Annotate a click with the hits relevant to `mode`
pub fn sample_pointer(picker: &impl Picker, mode: &Mode, ray: &Ray, probe_length: f32) -> PointerSample {
    match mode {
        Mode::Idle => PointerSample::default(),
        Mode::Draw { .. } => PointerSample {
            ground: ground_point(picker, ray),
            ..PointerSample::default()
        },
        Mode::Move { .. } => PointerSample {
            ground: ground_point(picker, ray),
            solid: picker
                .pick(ray, PickFilter::Solids)
                .and_then(|hit| hit.tag.shape()),
            vertex: None,
        },
        Mode::VertexEdit { .. } => PointerSample {
            ground: ground_point(picker, ray),
            solid: None,
            vertex: classify_vertex(picker, ray, probe_length),
        },
    }
}

/// Ground position under the ray, flattened onto elevation 0
pub fn ground_point(picker: &impl Picker, ray: &Ray) -> Option<Vec3> {
    picker
        .pick(ray, PickFilter::Ground)
        .map(|hit| Vec3::new(hit.point.x, 0.0, hit.point.z))
}

/// Vertex marker under the pointer.
///
/// A marker hit directly is the answer. Anything else is probed with a ray
/// straight down from the hit point, so markers hidden under a solid are
/// still found. No hit at all means "not a vertex".
pub fn classify_vertex(picker: &impl Picker, ray: &Ray, probe_length: f32) -> Option<MarkerKey> {
    let hit = picker.pick(ray, PickFilter::All)?;
    if let Some(key) = hit.tag.marker_key() {
        return Some(key);
    }
    picker
        .cast_ray(hit.point, Vec3::NEG_Y, probe_length)
        .iter()
        .find_map(|h| h.tag.marker_key())
}
