//! Cube shape: six quad faces split into twelve triangles.
//!
//! Triangles `2k` and `2k + 1` belong to face `k`, and face `k` is drawn with
//! material slot `k`. Face order: right (+X), left (-X), top (+Y), bottom (-Y),
//! front (+Z), back (-Z).

use std::f64::consts::{FRAC_PI_2, PI};

use glam::{DVec2, DVec3};

use super::{AdjacencyFace, GeometryKind, MeshTriangle, ShapeMesh, Transform, rotation_quadrant};

pub const FACE_COUNT: usize = 6;
pub const TRIANGLE_COUNT: usize = 12;

pub const FACE_RIGHT: usize = 0;
pub const FACE_LEFT: usize = 1;
pub const FACE_TOP: usize = 2;
pub const FACE_BOTTOM: usize = 3;
pub const FACE_FRONT: usize = 4;
pub const FACE_BACK: usize = 5;

const QUAD_UVS: [DVec2; 4] = [
    DVec2::new(0.0, 0.0),
    DVec2::new(1.0, 0.0),
    DVec2::new(1.0, 1.0),
    DVec2::new(0.0, 1.0),
];

/// Quad corners per face, counter-clockwise seen from outside, matching `QUAD_UVS`.
fn face_corners(h: f64) -> [[DVec3; 4]; FACE_COUNT] {
    [
        // right: u along -Z, v along +Y
        [
            DVec3::new(h, -h, h),
            DVec3::new(h, -h, -h),
            DVec3::new(h, h, -h),
            DVec3::new(h, h, h),
        ],
        // left: u along +Z, v along +Y
        [
            DVec3::new(-h, -h, -h),
            DVec3::new(-h, -h, h),
            DVec3::new(-h, h, h),
            DVec3::new(-h, h, -h),
        ],
        // top: u along +X, v along -Z
        [
            DVec3::new(-h, h, h),
            DVec3::new(h, h, h),
            DVec3::new(h, h, -h),
            DVec3::new(-h, h, -h),
        ],
        // bottom: u along +X, v along +Z
        [
            DVec3::new(-h, -h, -h),
            DVec3::new(h, -h, -h),
            DVec3::new(h, -h, h),
            DVec3::new(-h, -h, h),
        ],
        // front: u along +X, v along +Y
        [
            DVec3::new(-h, -h, h),
            DVec3::new(h, -h, h),
            DVec3::new(h, h, h),
            DVec3::new(-h, h, h),
        ],
        // back: u along -X, v along +Y
        [
            DVec3::new(h, -h, -h),
            DVec3::new(-h, -h, -h),
            DVec3::new(-h, h, -h),
            DVec3::new(h, h, -h),
        ],
    ]
}

/// Builds the cube mesh with edge length `size`.
pub fn build(size: f64) -> ShapeMesh {
    let h = size / 2.0;
    let faces = face_corners(h);

    let mut triangles = Vec::with_capacity(TRIANGLE_COUNT);
    for (slot, c) in faces.iter().enumerate() {
        triangles.push(MeshTriangle {
            positions: [c[0], c[1], c[2]],
            uvs: [QUAD_UVS[0], QUAD_UVS[1], QUAD_UVS[2]],
            material_slot: slot,
        });
        triangles.push(MeshTriangle {
            positions: [c[0], c[2], c[3]],
            uvs: [QUAD_UVS[0], QUAD_UVS[2], QUAD_UVS[3]],
            material_slot: slot,
        });
    }

    let mut vertices = Vec::with_capacity(8);
    for x in [-h, h] {
        for y in [-h, h] {
            for z in [-h, h] {
                vertices.push(DVec3::new(x, y, z));
            }
        }
    }

    let adjacency = faces
        .iter()
        .enumerate()
        .map(|(slot, corners)| AdjacencyFace {
            slot,
            corners: corners.to_vec(),
        })
        .collect();

    ShapeMesh::new(GeometryKind::Cube, triangles, vertices, adjacency)
}

/// Local attachment frame for a new item placed against `triangle`.
///
/// The new item sits one unit out along the face normal. Top and bottom
/// placements turn about Y by the clicked quadrant. Wedges get extra fixed
/// rotations so the slope faces away from the clicked face.
///
/// # Returns
///
/// `None` if `triangle` is not a cube triangle.
pub fn local_attachment(triangle: usize, uv: DVec2, new_kind: GeometryKind) -> Option<Transform> {
    if triangle >= TRIANGLE_COUNT {
        return None;
    }
    let quadrant = rotation_quadrant(uv);
    let wedge = new_kind == GeometryKind::Wedge;
    let frame = Transform::IDENTITY;

    let frame = match triangle / 2 {
        FACE_RIGHT => {
            let frame = frame.translated(DVec3::X);
            if wedge {
                frame.rotated_z(-FRAC_PI_2).rotated_y(quadrant + FRAC_PI_2)
            } else {
                frame
            }
        }
        FACE_LEFT => {
            let frame = frame.translated(DVec3::NEG_X);
            if wedge {
                frame.rotated_z(FRAC_PI_2).rotated_y(quadrant - FRAC_PI_2)
            } else {
                frame
            }
        }
        FACE_TOP => frame.translated(DVec3::Y).rotated_y(quadrant),
        FACE_BOTTOM => {
            let frame = frame.translated(DVec3::NEG_Y);
            let frame = if wedge {
                frame.rotated_y(PI).rotated_x(PI)
            } else {
                frame
            };
            frame.rotated_y(quadrant + PI)
        }
        FACE_FRONT => {
            let frame = frame.translated(DVec3::Z);
            if wedge {
                frame.rotated_x(FRAC_PI_2).rotated_y(quadrant)
            } else {
                frame
            }
        }
        _ => {
            let frame = frame.translated(DVec3::NEG_Z);
            if wedge {
                frame.rotated_x(-FRAC_PI_2).rotated_y(quadrant + PI)
            } else {
                frame
            }
        }
    };
    Some(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: DVec2 = DVec2::new(0.5, 0.5);

    #[test]
    fn test_mesh_layout() {
        let mesh = build(0.9998);
        assert_eq!(mesh.triangles().len(), TRIANGLE_COUNT);
        assert_eq!(mesh.local_vertices().len(), 8);
        assert_eq!(mesh.adjacency_faces().len(), FACE_COUNT);
        for (index, tri) in mesh.triangles().iter().enumerate() {
            assert_eq!(tri.material_slot, index / 2);
        }
    }

    #[test]
    fn test_face_normals_point_outward() {
        let mesh = build(1.0);
        let expected = [DVec3::X, DVec3::NEG_X, DVec3::Y, DVec3::NEG_Y, DVec3::Z, DVec3::NEG_Z];
        for (index, tri) in mesh.triangles().iter().enumerate() {
            let normal = tri.normal().normalize();
            assert!(
                normal.abs_diff_eq(expected[index / 2], 1e-12),
                "triangle {} normal {:?}",
                index,
                normal
            );
        }
    }

    #[test]
    fn test_offsets_follow_face_normals() {
        let expected = [DVec3::X, DVec3::NEG_X, DVec3::Y, DVec3::NEG_Y, DVec3::Z, DVec3::NEG_Z];
        for triangle in 0..TRIANGLE_COUNT {
            let frame = local_attachment(triangle, CENTER, GeometryKind::Cube).unwrap();
            assert_eq!(frame.position, expected[triangle / 2]);
        }
    }

    #[test]
    fn test_side_faces_do_not_rotate_cubes() {
        for triangle in [0, 1, 2, 3, 8, 9, 10, 11] {
            let frame = local_attachment(triangle, DVec2::new(0.9, 0.1), GeometryKind::Cube).unwrap();
            assert_eq!(frame.rotation, glam::DQuat::IDENTITY);
        }
    }

    #[test]
    fn test_top_face_turns_by_quadrant() {
        let frame = local_attachment(4, CENTER, GeometryKind::Cube).unwrap();
        let expected = Transform::from_translation(DVec3::Y).rotated_y(FRAC_PI_2);
        assert!(frame.approx_eq(&expected, 1e-12));
    }

    #[test]
    fn test_wedge_on_front_face_tilts_slope() {
        let frame = local_attachment(8, CENTER, GeometryKind::Wedge).unwrap();
        let expected = Transform::from_translation(DVec3::Z)
            .rotated_x(FRAC_PI_2)
            .rotated_y(FRAC_PI_2);
        assert!(frame.approx_eq(&expected, 1e-12));
    }

    #[test]
    fn test_out_of_range_triangle() {
        assert!(local_attachment(12, CENTER, GeometryKind::Cube).is_none());
    }
}
