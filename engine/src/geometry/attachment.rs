//! Attachment resolution: where a new item goes when the user clicks a
//! triangle of an existing one.
//!
//! Each shape produces a frame local to the clicked item. The world frame of
//! the new item is the clicked item's transform composed with it.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec2;

use super::{GeometryKind, ShapeMesh, Transform, cube, sphere, wedge};

/// Snaps the click position on a face to one of four 90° turns about the
/// face normal.
///
/// The face is split into four wedges around its UV center, so clicking near
/// an edge turns the new item toward that edge. The center itself maps to 90°.
pub fn rotation_quadrant(uv: DVec2) -> f64 {
    let angle = (uv.y - 0.5).atan2(uv.x - 0.5);
    let quadrant = ((angle / TAU + 0.375) * 4.0).floor().rem_euclid(4.0);
    quadrant * FRAC_PI_2
}

/// Resolves the world frame for an item of `new_kind` attached to `triangle`
/// of an item with shape `parent_mesh` at `parent`.
///
/// # Returns
///
/// `None` when the clicked triangle does not accept attachments.
pub fn resolve_attachment(
    parent: &Transform,
    parent_mesh: &ShapeMesh,
    new_kind: GeometryKind,
    triangle: usize,
    uv: DVec2,
) -> Option<Transform> {
    let local = match parent_mesh.kind() {
        GeometryKind::Cube => cube::local_attachment(triangle, uv, new_kind),
        GeometryKind::Wedge => wedge::local_attachment(triangle, uv),
        GeometryKind::Sphere => sphere::local_attachment(parent_mesh, triangle),
    }?;
    Some(parent.mul_transform(&local))
}
