use glam::Vec3;
use shared::{planar_delta, MarkerKey, ShapeIndex};

/// Solid held in move mode
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidGrab {
    pub shape: ShapeIndex,
    /// Ground position the last delta was measured from
    pub anchor: Vec3,
}

/// Vertex held in vertex-edit mode
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexGrab {
    pub key: MarkerKey,
    /// Ground position the last delta was measured from
    pub anchor: Vec3,
}

impl SolidGrab {
    pub fn new(shape: ShapeIndex, anchor: Vec3) -> Self {
        Self { shape, anchor }
    }

    /// Planar delta from the anchor to `ground`; the anchor moves along
    pub fn step(&mut self, ground: Vec3) -> Vec3 {
        step(&mut self.anchor, ground)
    }
}

impl VertexGrab {
    pub fn new(key: MarkerKey, anchor: Vec3) -> Self {
        Self { key, anchor }
    }

    pub fn step(&mut self, ground: Vec3) -> Vec3 {
        step(&mut self.anchor, ground)
    }
}

/// Incremental drag: delta since the previous pointer sample
fn step(anchor: &mut Vec3, ground: Vec3) -> Vec3 {
    let delta = planar_delta(*anchor, ground);
    *anchor = ground;
    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_relative() {
        let mut grab = SolidGrab::new(0, Vec3::new(0.5, 0.0, 0.5));
        let d1 = grab.step(Vec3::new(0.7, 0.0, 0.6));
        let d2 = grab.step(Vec3::new(1.0, 0.0, 0.7));
        assert!((d1.x - 0.2).abs() < 1e-6);
        assert!((d2.x - 0.3).abs() < 1e-6);
        assert!((d1 + d2 - Vec3::new(0.5, 0.0, 0.2)).length() < 1e-6);
        assert_eq!(grab.anchor, Vec3::new(1.0, 0.0, 0.7));
    }

    #[test]
    fn test_step_ignores_elevation() {
        let mut grab = VertexGrab::new(MarkerKey::new(0, 1), Vec3::ZERO);
        let d = grab.step(Vec3::new(0.1, 0.3, 0.0));
        assert_eq!(d.y, 0.0);
    }
}
