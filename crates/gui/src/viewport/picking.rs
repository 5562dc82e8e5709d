use glam::Vec3;

use super::mesh::MeshData;

/// Height above the ground that vertical probe rays start from
pub const PROBE_HEIGHT: f32 = 10.0;

/// A ray in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray looking straight down onto ground position (x, z)
    pub fn down_at(x: f32, z: f32) -> Self {
        Self::new(Vec3::new(x, PROBE_HEIGHT, z), Vec3::NEG_Y)
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Same ray expressed relative to a primitive placed at `position`
    pub fn relative_to(&self, position: Vec3) -> Self {
        Self {
            origin: self.origin - position,
            direction: self.direction,
        }
    }
}

/// Intersect the ray with the y = 0 plane, limited to a `width` x `depth`
/// rectangle centred on the origin.
pub fn ray_ground(ray: &Ray, width: f32, depth: f32) -> Option<f32> {
    if ray.direction.y.abs() < 1e-6 {
        return None; // Ray parallel to ground
    }
    let t = -ray.origin.y / ray.direction.y;
    if t < 0.0 {
        return None; // Ground behind the ray
    }
    let hit = ray.at(t);
    if hit.x.abs() > width * 0.5 || hit.z.abs() > depth * 0.5 {
        return None;
    }
    Some(t)
}

/// Nearest non-negative intersection distance with a sphere
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let t0 = -b - sqrt_disc;
    let t1 = -b + sqrt_disc;
    if t0 >= 0.0 {
        Some(t0)
    } else if t1 >= 0.0 {
        Some(t1)
    } else {
        None
    }
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Returns the distance along the ray if hit, or None if no intersection.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    // Outside triangle (u)
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    // Outside triangle (v)
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Result of picking a triangle in a mesh
#[derive(Clone, Debug)]
pub struct TriangleHit {
    /// Index of the triangle (into mesh.indices / 3)
    pub triangle_index: usize,
    /// Distance from ray origin to hit point
    pub distance: f32,
    /// Normal of the hit triangle
    pub normal: Vec3,
}

/// Find the nearest triangle of a mesh placed at `position` intersected by the ray.
pub fn pick_triangle(ray: &Ray, mesh: &MeshData, position: Vec3) -> Option<TriangleHit> {
    let local = ray.relative_to(position);
    let mut best: Option<TriangleHit> = None;

    for tri_idx in 0..mesh.triangle_count() {
        let [v0, v1, v2] = mesh.triangle(tri_idx);
        if let Some(dist) = ray_triangle_intersect(&local, v0, v1, v2) {
            if best.as_ref().is_none_or(|b| dist < b.distance) {
                let first = mesh.indices[tri_idx * 3] as usize;
                best = Some(TriangleHit {
                    triangle_index: tri_idx,
                    distance: dist,
                    normal: mesh.normal(first),
                });
            }
        }
    }

    best
}
