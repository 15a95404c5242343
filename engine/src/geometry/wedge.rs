//! 45° wedge: a ramp rising from the front edge (+Z) to the back edge (-Z).
//!
//! Corners (`size` = edge length, `h` = size / 2):
//!
//! ```text
//!            top (y ≈ 0.207, z ≈ -0.207)
//!           /|
//!  slope   / |  back
//!         /  |
//!  front +---+ back (y = -h, z = -h)
//! ```
//!
//! The slanted front and the top corners are pulled in by the spacing so a
//! wedge sitting on a slope keeps the same gap as two cubes would.
//!
//! Triangles: 0 left, 1 right, 2-3 slanted front, 4-5 back, 6-7 bottom.
//! Material slots: 0 slope, 1 bottom, 2 back, 3 left, 4 right.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4, PI};

use glam::{DVec2, DVec3};

use super::{AdjacencyFace, GeometryKind, MeshTriangle, ShapeMesh, Transform, rotation_quadrant};

pub const FACE_COUNT: usize = 5;
pub const TRIANGLE_COUNT: usize = 8;

pub const SLOT_SLOPE: usize = 0;
pub const SLOT_BOTTOM: usize = 1;
pub const SLOT_BACK: usize = 2;
pub const SLOT_LEFT: usize = 3;
pub const SLOT_RIGHT: usize = 4;

/// Builds the wedge mesh with edge length `size`.
pub fn build(size: f64) -> ShapeMesh {
    let h = size / 2.0;
    let shrinkage = (1.0 - size) / 2.0;
    let height = FRAC_1_SQRT_2 * size;
    let long_x = FRAC_1_SQRT_2 * size;
    let short_x = size - long_x;
    let top_z = h - long_x;
    let top_y = height - h - shrinkage / FRAC_1_SQRT_2;
    let front_z = h - shrinkage / FRAC_1_SQRT_2;

    let left_front = DVec3::new(-h, -h, front_z);
    let left_top = DVec3::new(-h, top_y, top_z);
    let left_back = DVec3::new(-h, -h, -h);
    let right_front = DVec3::new(h, -h, front_z);
    let right_back = DVec3::new(h, -h, -h);
    let right_top = DVec3::new(h, top_y, top_z);

    let uv = DVec2::new;
    let tri = |positions, uvs, material_slot| MeshTriangle {
        positions,
        uvs,
        material_slot,
    };

    let triangles = vec![
        tri(
            [left_front, left_top, left_back],
            [uv(size, 0.0), uv(short_x, height), uv(0.0, 0.0)],
            SLOT_LEFT,
        ),
        tri(
            [right_front, right_back, right_top],
            [uv(0.0, 0.0), uv(size, 0.0), uv(long_x, height)],
            SLOT_RIGHT,
        ),
        tri(
            [left_front, right_top, left_top],
            [uv(0.0, 0.0), uv(size, height), uv(0.0, height)],
            SLOT_SLOPE,
        ),
        tri(
            [left_front, right_front, right_top],
            [uv(0.0, 0.0), uv(size, 0.0), uv(size, height)],
            SLOT_SLOPE,
        ),
        tri(
            [right_back, left_top, right_top],
            [uv(0.0, 0.0), uv(size, height), uv(0.0, height)],
            SLOT_BACK,
        ),
        tri(
            [right_back, left_back, left_top],
            [uv(0.0, 0.0), uv(size, 0.0), uv(size, height)],
            SLOT_BACK,
        ),
        tri(
            [left_front, right_back, right_front],
            [uv(0.0, size), uv(size, 0.0), uv(size, size)],
            SLOT_BOTTOM,
        ),
        tri(
            [left_front, left_back, right_back],
            [uv(0.0, size), uv(0.0, 0.0), uv(size, 0.0)],
            SLOT_BOTTOM,
        ),
    ];

    let vertices = vec![left_front, left_top, left_back, right_front, right_back, right_top];

    let faces = vec![
        AdjacencyFace {
            slot: SLOT_SLOPE,
            corners: vec![left_front, right_front, right_top, left_top],
        },
        AdjacencyFace {
            slot: SLOT_BOTTOM,
            corners: vec![left_front, right_front, right_back, left_back],
        },
    ];

    ShapeMesh::new(GeometryKind::Wedge, triangles, vertices, faces)
}

/// Local attachment frame for a new item placed against `triangle`.
///
/// Only the slanted front and the bottom accept attachments. Items on the
/// slope are tilted 45° so their bottom rests flat on it.
pub fn local_attachment(triangle: usize, uv: DVec2) -> Option<Transform> {
    let quadrant = rotation_quadrant(uv);
    match triangle {
        2 | 3 => {
            let slope_edge =
                Transform::from_translation(DVec3::new(0.0, -0.5, 0.5)).rotated_x(FRAC_PI_4);
            let anchor = slope_edge.mul_transform(&Transform::from_translation(DVec3::new(
                0.0, 0.5, -0.5,
            )));
            Some(anchor.rotated_y(quadrant))
        }
        6 | 7 => Some(
            Transform::from_translation(DVec3::NEG_Y)
                .rotated_z(PI)
                .rotated_y(PI + quadrant),
        ),
        _ => None,
    }
}
