//! Ray intersection against triangle meshes
//!
//! Used by the containment probes and by ray picking. Triangles are
//! double-sided: a ray hits from either side of the winding.
//!
//! # Ray-Triangle Intersection
//!
//! Möller–Trumbore: solve `origin + t * dir = (1 - u - v) * a + u * b + v * c`
//! with Cramer's rule. Barycentric bounds are widened by a small tolerance so
//! a ray through the diagonal shared by two triangles of a quad counts as a
//! hit on at least one of them.
//!
//! # Example
//!
//! ```ignore
//! use voxel_builder_engine::physics::collision::ray_triangle_intersect;
//! use glam::DVec3;
//!
//! let tri = [DVec3::new(-1.0, 0.0, -1.0), DVec3::new(1.0, 0.0, -1.0), DVec3::new(0.0, 0.0, 1.0)];
//! if let Some(hit) = ray_triangle_intersect(DVec3::new(0.0, 5.0, 0.0), DVec3::NEG_Y, &tri) {
//!     println!("Hit at distance {}", hit.t);
//! }
//! ```

use glam::{DVec2, DVec3};

use crate::geometry::{MeshTriangle, ShapeMesh, Transform};

/// Determinant magnitude below which a ray counts as parallel to a triangle.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Slack on the barycentric bounds so shared edges never leak.
const BARYCENTRIC_TOLERANCE: f64 = 1e-9;

/// A ray-triangle hit in barycentric form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Distance along the ray in units of the direction length
    pub t: f64,
    /// Weight of the second vertex
    pub u: f64,
    /// Weight of the third vertex
    pub v: f64,
}

/// Information about a ray hitting a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    /// Index of the hit triangle in the mesh
    pub triangle: usize,
    /// Distance along the ray
    pub distance: f64,
    /// Hit position in the space the ray was given in
    pub position: DVec3,
    /// Interpolated texture coordinate at the hit
    pub uv: DVec2,
}

/// Double-sided Möller–Trumbore ray-triangle test.
///
/// # Arguments
///
/// * `origin` - Ray start
/// * `dir` - Ray direction (need not be normalized)
/// * `tri` - Triangle corners
///
/// # Returns
///
/// * `Some(hit)` - Intersection strictly in front of the origin
/// * `None` - Miss, parallel ray, or intersection behind the origin
pub fn ray_triangle_intersect(origin: DVec3, dir: DVec3, tri: &[DVec3; 3]) -> Option<TriangleHit> {
    let edge1 = tri[1] - tri[0];
    let edge2 = tri[2] - tri[0];
    let pvec = dir.cross(edge2);
    let det = edge1.dot(pvec);

    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = origin - tri[0];
    let u = tvec.dot(pvec) * inv_det;
    if !(-BARYCENTRIC_TOLERANCE..=1.0 + BARYCENTRIC_TOLERANCE).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = dir.dot(qvec) * inv_det;
    if v < -BARYCENTRIC_TOLERANCE || u + v > 1.0 + BARYCENTRIC_TOLERANCE {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    (t > PARALLEL_EPSILON).then_some(TriangleHit { t, u, v })
}

/// True if the ray hits any triangle of the mesh.
pub fn ray_hits_mesh(origin: DVec3, dir: DVec3, triangles: &[MeshTriangle]) -> bool {
    triangles
        .iter()
        .any(|tri| ray_triangle_intersect(origin, dir, &tri.positions).is_some())
}

/// Casts a ray against a mesh placed at `transform` and returns the closest hit.
///
/// The ray is given in world space and tested in the mesh's local frame, so
/// the mesh data stays shared between items.
///
/// # Arguments
///
/// * `origin` - World-space ray start
/// * `dir` - World-space direction (should be normalized for `distance` to be metric)
/// * `max_dist` - Hits farther than this are ignored
pub fn ray_cast_mesh(
    transform: &Transform,
    mesh: &ShapeMesh,
    origin: DVec3,
    dir: DVec3,
    max_dist: f64,
) -> Option<HitInfo> {
    let local_origin = transform.inverse_transform_point(origin);
    let local_dir = transform.inverse_transform_vector(dir);

    let mut closest: Option<HitInfo> = None;
    let mut closest_dist = max_dist;

    for (index, tri) in mesh.triangles().iter().enumerate() {
        if let Some(hit) = ray_triangle_intersect(local_origin, local_dir, &tri.positions) {
            // Strict comparison keeps the lower triangle index on ties
            if hit.t < closest_dist {
                closest_dist = hit.t;
                closest = Some(HitInfo {
                    triangle: index,
                    distance: hit.t,
                    position: origin + dir * hit.t,
                    uv: tri.uv_at(hit.u, hit.v),
                });
            }
        }
    }

    closest
}
