//! Sphere shape: a UV-sphere with one material slot and no culled faces.

use std::f64::consts::{PI, TAU};

use glam::{DVec2, DVec3};

use super::{GeometryKind, MeshTriangle, ShapeMesh, Transform};

pub const FACE_COUNT: usize = 1;

/// Builds a UV-sphere of `radius` with `segments` around Y and `rings` pole to pole.
pub fn build(radius: f64, segments: u32, rings: u32) -> ShapeMesh {
    let point = |ring: u32, seg: u32| {
        let phi = ring as f64 / rings as f64 * PI;
        let theta = seg as f64 / segments as f64 * TAU;
        DVec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.cos(),
            radius * phi.sin() * theta.sin(),
        )
    };
    let uv = |ring: u32, seg: u32| {
        DVec2::new(seg as f64 / segments as f64, 1.0 - ring as f64 / rings as f64)
    };

    let mut triangles = Vec::new();
    for ring in 0..rings {
        for seg in 0..segments {
            let (a, b) = ((ring, seg), (ring, seg + 1));
            let (c, d) = ((ring + 1, seg), (ring + 1, seg + 1));
            // Two triangles per quad, skipping the degenerate one at each pole
            if ring != 0 {
                triangles.push(MeshTriangle {
                    positions: [point(a.0, a.1), point(b.0, b.1), point(c.0, c.1)],
                    uvs: [uv(a.0, a.1), uv(b.0, b.1), uv(c.0, c.1)],
                    material_slot: 0,
                });
            }
            if ring != rings - 1 {
                triangles.push(MeshTriangle {
                    positions: [point(b.0, b.1), point(d.0, d.1), point(c.0, c.1)],
                    uvs: [uv(b.0, b.1), uv(d.0, d.1), uv(c.0, c.1)],
                    material_slot: 0,
                });
            }
        }
    }

    let mut vertices = vec![point(0, 0)];
    for ring in 1..rings {
        vertices.extend((0..segments).map(|seg| point(ring, seg)));
    }
    vertices.push(point(rings, 0));

    ShapeMesh::new(GeometryKind::Sphere, triangles, vertices, Vec::new())
}

/// Local attachment frame one unit out from the clicked triangle, snapped to
/// the dominant axis of its outward direction.
pub fn local_attachment(mesh: &ShapeMesh, triangle: usize) -> Option<Transform> {
    let outward = mesh.triangle(triangle)?.centroid();
    let abs = outward.abs();
    let axis = if abs.x >= abs.y && abs.x >= abs.z {
        DVec3::new(outward.x.signum(), 0.0, 0.0)
    } else if abs.y >= abs.z {
        DVec3::new(0.0, outward.y.signum(), 0.0)
    } else {
        DVec3::new(0.0, 0.0, outward.z.signum())
    };
    Some(Transform::from_translation(axis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_counts() {
        let mesh = build(0.5, 16, 8);
        // Two triangles per quad minus one per pole quad
        assert_eq!(mesh.triangles().len(), 16 * 8 * 2 - 2 * 16);
        assert_eq!(mesh.local_vertices().len(), 2 + 16 * 7);
        assert!(mesh.adjacency_faces().is_empty());
        assert!(mesh.triangles().iter().all(|t| t.material_slot == 0));
    }

    #[test]
    fn test_vertices_on_surface() {
        let mesh = build(0.4999, 12, 6);
        for v in mesh.local_vertices() {
            assert!((v.length() - 0.4999).abs() < 1e-12);
        }
    }

    #[test]
    fn test_top_cap_attaches_above() {
        let mesh = build(0.5, 16, 8);
        // First triangle of the first ring touches the north pole
        let frame = local_attachment(&mesh, 0).unwrap();
        assert_eq!(frame.position, DVec3::Y);
        assert!(local_attachment(&mesh, mesh.triangles().len()).is_none());
    }
}
