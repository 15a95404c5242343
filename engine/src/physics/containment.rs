//! Point-in-solid test for placed items.
//!
//! The point is moved into the item's local frame. Six probes sit one unit
//! away along ±X, ±Y and ±Z; each casts a ray toward the point. The point is
//! inside only if every probe ray crosses the mesh.
//!
//! This is an approximation: a point in a concave pocket could be reported
//! inside. All built-in shapes are convex, and every shape fits within half a
//! unit of its origin, so the probes always start outside.

use glam::DVec3;

use super::collision::ray_hits_mesh;
use crate::geometry::{ShapeMesh, Transform};

const PROBE_DIRECTIONS: [DVec3; 6] = [
    DVec3::X,
    DVec3::NEG_X,
    DVec3::Y,
    DVec3::NEG_Y,
    DVec3::Z,
    DVec3::NEG_Z,
];

/// Whether `point` (world space) lies inside `mesh` placed at `transform`.
pub fn point_in_solid(point: DVec3, transform: &Transform, mesh: &ShapeMesh) -> bool {
    let local = transform.inverse_transform_point(point);
    PROBE_DIRECTIONS.iter().all(|&offset| {
        let probe = local + offset;
        ray_hits_mesh(probe, -offset, mesh.triangles())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{cube, sphere, wedge};
    use glam::DQuat;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_cube_center_inside() {
        let mesh = cube::build(0.9998);
        assert!(point_in_solid(DVec3::ZERO, &Transform::IDENTITY, &mesh));
        assert!(point_in_solid(DVec3::splat(0.49), &Transform::IDENTITY, &mesh));
    }

    #[test]
    fn test_cube_outside() {
        let mesh = cube::build(0.9998);
        assert!(!point_in_solid(DVec3::new(0.0, 0.5001, 0.0), &Transform::IDENTITY, &mesh));
        assert!(!point_in_solid(DVec3::new(0.8, 0.0, 0.0), &Transform::IDENTITY, &mesh));
        assert!(!point_in_solid(DVec3::new(3.0, 3.0, 3.0), &Transform::IDENTITY, &mesh));
    }

    #[test]
    fn test_rotated_cube() {
        let mesh = cube::build(0.9998);
        let transform = Transform::new(DVec3::new(2.0, 0.0, 0.0), DQuat::from_rotation_y(FRAC_PI_4));
        // Corner direction of the unrotated cube sticks out after a 45° turn
        assert!(point_in_solid(DVec3::new(2.6, 0.0, 0.0), &transform, &mesh));
        assert!(!point_in_solid(DVec3::new(2.45, 0.0, 0.45), &transform, &mesh));
    }

    #[test]
    fn test_wedge_slope_boundary() {
        let mesh = wedge::build(0.9998);
        // Low on the front edge is solid, high on the front edge is above the slope
        assert!(point_in_solid(DVec3::new(0.0, -0.4, 0.3), &Transform::IDENTITY, &mesh));
        assert!(!point_in_solid(DVec3::new(0.0, 0.4, 0.3), &Transform::IDENTITY, &mesh));
    }

    #[test]
    fn test_sphere() {
        let mesh = sphere::build(0.4999, 16, 8);
        assert!(point_in_solid(DVec3::ZERO, &Transform::IDENTITY, &mesh));
        assert!(!point_in_solid(DVec3::new(0.45, 0.45, 0.0), &Transform::IDENTITY, &mesh));
    }
}
