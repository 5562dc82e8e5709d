//! Prism generation from a ground footprint.
//!
//! Caps are triangulated with earcut so concave footprints stay correct; the
//! side walls are one quad per footprint edge.

use glam::Vec3;
use thiserror::Error;

use crate::viewport::mesh::MeshData;

const DEFAULT_COLOR: [f32; 3] = [0.6, 0.6, 0.65];

/// Why a footprint could not be turned into a solid
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("footprint needs at least 3 distinct points, got {0}")]
    TooFewPoints(usize),
    #[error("footprint triangulation failed: {0}")]
    Triangulation(String),
    #[error("footprint has no area")]
    Degenerate,
}

/// Mesh plus the outline edges drawn on top of it
#[derive(Debug, Clone, PartialEq)]
pub struct SolidGeometry {
    pub mesh: MeshData,
    pub edges: Vec<[Vec3; 2]>,
}

/// Turns a planar point loop into a prism
pub trait GeometryProvider {
    /// Extrude `footprint` (points on y = 0, optionally closed) downward by
    /// `depth`: the top cap lies at y = 0 and the bottom cap at y = -depth.
    fn extrude_polygon(&self, footprint: &[Vec3], depth: f32) -> Result<SolidGeometry, GeometryError>;
}

/// Earcut-backed prism builder
#[derive(Debug, Clone, Copy, Default)]
pub struct EarcutExtruder;

impl GeometryProvider for EarcutExtruder {
    fn extrude_polygon(&self, footprint: &[Vec3], depth: f32) -> Result<SolidGeometry, GeometryError> {
        let ring = open_ring(footprint);
        let n = ring.len();
        if n < 3 {
            return Err(GeometryError::TooFewPoints(n));
        }

        let area = signed_area_xz(ring);
        if area.abs() < 1e-9 {
            return Err(GeometryError::Degenerate);
        }

        let coords: Vec<f64> = ring
            .iter()
            .flat_map(|p| [p.x as f64, p.z as f64])
            .collect();
        let triangles = earcutr::earcut(&coords, &[], 2)
            .map_err(|e| GeometryError::Triangulation(format!("{e:?}")))?;
        if triangles.is_empty() {
            return Err(GeometryError::Degenerate);
        }

        let top: Vec<Vec3> = ring.iter().map(|p| Vec3::new(p.x, 0.0, p.z)).collect();
        let bottom: Vec<Vec3> = top.iter().map(|p| *p - Vec3::Y * depth).collect();

        let mut mesh = MeshData::default();

        // Top cap
        let base = mesh.vertex_count() as u32;
        for p in &top {
            mesh.push_vertex(*p, Vec3::Y, DEFAULT_COLOR);
        }
        for tri in triangles.chunks_exact(3) {
            mesh.indices
                .extend_from_slice(&[base + tri[0] as u32, base + tri[1] as u32, base + tri[2] as u32]);
        }

        // Bottom cap (reversed winding)
        let base = mesh.vertex_count() as u32;
        for p in &bottom {
            mesh.push_vertex(*p, Vec3::NEG_Y, DEFAULT_COLOR);
        }
        for tri in triangles.chunks_exact(3) {
            mesh.indices
                .extend_from_slice(&[base + tri[0] as u32, base + tri[2] as u32, base + tri[1] as u32]);
        }

        // Side walls
        let outward = area.signum();
        for i in 0..n {
            let next = (i + 1) % n;
            let d = top[next] - top[i];
            let normal = (Vec3::new(d.z, 0.0, -d.x) * outward).normalize_or_zero();

            let base = mesh.vertex_count() as u32;
            mesh.push_vertex(top[i], normal, DEFAULT_COLOR);
            mesh.push_vertex(top[next], normal, DEFAULT_COLOR);
            mesh.push_vertex(bottom[next], normal, DEFAULT_COLOR);
            mesh.push_vertex(bottom[i], normal, DEFAULT_COLOR);
            mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
            mesh.indices.extend_from_slice(&[base, base + 2, base + 3]);
        }

        let mut edges = Vec::with_capacity(n * 3);
        for i in 0..n {
            let next = (i + 1) % n;
            edges.push([top[i], top[next]]);
            edges.push([bottom[i], bottom[next]]);
            edges.push([top[i], bottom[i]]);
        }

        Ok(SolidGeometry { mesh, edges })
    }
}

/// Drop the closing duplicate of a point loop, if present
pub fn open_ring(points: &[Vec3]) -> &[Vec3] {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 && first.distance_squared(*last) < 1e-12 => {
            &points[..points.len() - 1]
        }
        _ => points,
    }
}

/// Shoelace area in the x/z plane (sign gives orientation)
pub fn signed_area_xz(ring: &[Vec3]) -> f32 {
    let n = ring.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        sum += a.x * b.z - b.x * a.z;
    }
    sum * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f32, f32)]) -> Vec<Vec3> {
        coords.iter().map(|&(x, z)| Vec3::new(x, 0.0, z)).collect()
    }

    #[test]
    fn test_triangle_prism_counts() {
        let geo = EarcutExtruder
            .extrude_polygon(&pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]), 0.3)
            .unwrap();
        // 2 caps x 3 verts + 3 walls x 4 verts
        assert_eq!(geo.mesh.vertex_count(), 18);
        // 1 tri per cap + 2 per wall
        assert_eq!(geo.mesh.triangle_count(), 8);
        assert_eq!(geo.edges.len(), 9);
    }

    #[test]
    fn test_prism_spans_depth_below_origin() {
        let geo = EarcutExtruder
            .extrude_polygon(&pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]), 0.3)
            .unwrap();
        let (min, max) = geo.mesh.bounds().unwrap();
        assert!((min.y + 0.3).abs() < 1e-6);
        assert!(max.y.abs() < 1e-6);
        assert_eq!(min.x, 0.0);
        assert_eq!(max.x, 2.0);
    }

    #[test]
    fn test_closed_loop_accepted() {
        let closed = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let geo = EarcutExtruder.extrude_polygon(&closed, 0.3).unwrap();
        assert_eq!(geo.mesh.triangle_count(), 8);
    }

    #[test]
    fn test_concave_footprint_cap_area() {
        // L-shape, area 3
        let l_shape = pts(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let geo = EarcutExtruder.extrude_polygon(&l_shape, 0.5).unwrap();
        let cap_area: f32 = (0..4)
            .map(|t| {
                let [a, b, c] = geo.mesh.triangle(t);
                (b - a).cross(c - a).length() * 0.5
            })
            .sum();
        assert!((cap_area - 3.0).abs() < 1e-4, "cap area {cap_area}");
    }

    #[test]
    fn test_side_normals_point_outward() {
        for ring in [
            pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
            pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]),
        ] {
            let geo = EarcutExtruder.extrude_polygon(&ring, 0.3).unwrap();
            let center = Vec3::new(0.5, -0.15, 0.5);
            // Wall vertices start after both caps
            for v in (8..geo.mesh.vertex_count()).step_by(4) {
                let p = geo.mesh.position(v);
                let n = geo.mesh.normal(v);
                let mid = (p + geo.mesh.position(v + 2)) * 0.5;
                assert!((mid - center).dot(n) > 0.0, "inward wall normal at vertex {v}");
            }
        }
    }

    #[test]
    fn test_too_few_points() {
        let err = EarcutExtruder
            .extrude_polygon(&pts(&[(0.0, 0.0), (1.0, 0.0)]), 0.3)
            .unwrap_err();
        assert_eq!(err, GeometryError::TooFewPoints(2));
    }

    #[test]
    fn test_collinear_is_degenerate() {
        let err = EarcutExtruder
            .extrude_polygon(&pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]), 0.3)
            .unwrap_err();
        assert_eq!(err, GeometryError::Degenerate);
    }

    #[test]
    fn test_open_ring() {
        let closed = pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
        assert_eq!(open_ring(&closed).len(), 2);
        let open = pts(&[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(open_ring(&open).len(), 2);
        assert!(open_ring(&[]).is_empty());
    }
}
