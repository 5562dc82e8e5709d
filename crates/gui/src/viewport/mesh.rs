use glam::Vec3;

/// Floats per vertex in [`MeshData::vertices`]
pub const VERTEX_STRIDE: usize = 9;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, index: usize) -> Vec3 {
        let base = index * VERTEX_STRIDE;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    pub fn normal(&self, index: usize) -> Vec3 {
        let base = index * VERTEX_STRIDE + 3;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    /// Corner positions of triangle `tri`
    pub fn triangle(&self, tri: usize) -> [Vec3; 3] {
        let i = tri * 3;
        [
            self.position(self.indices[i] as usize),
            self.position(self.indices[i + 1] as usize),
            self.position(self.indices[i + 2] as usize),
        ]
    }

    /// Append a vertex and return its index
    pub fn push_vertex(&mut self, pos: Vec3, normal: Vec3, color: [f32; 3]) -> u32 {
        let index = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&[
            pos.x, pos.y, pos.z, normal.x, normal.y, normal.z, color[0], color[1], color[2],
        ]);
        index
    }

    /// Axis-aligned bounds of all vertex positions
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        if self.vertex_count() == 0 {
            return None;
        }
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for i in 0..self.vertex_count() {
            let p = self.position(i);
            min = min.min(p);
            max = max.max(p);
        }
        Some((min, max))
    }
}
