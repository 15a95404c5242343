//! Block Geometry
//!
//! The three built-in shapes an item can have, each with:
//! - a local triangle mesh with per-vertex UVs (for picking and containment)
//! - the unique local vertices (for collision sampling)
//! - adjacency faces in material-slot order (for hidden-face culling)
//! - attachment rules for items placed against one of its triangles
//!
//! # Shapes
//!
//! - **Cube**: six quad faces, twelve triangles
//! - **Wedge**: 45° ramp with a slanted top, five material slots
//! - **Sphere**: tessellated ball, one material slot, rises and despawns over time
//!
//! Shape data lives in a [`GeometryCatalog`] built once from the engine
//! configuration and shared by reference.

pub mod attachment;
pub mod catalog;
pub mod cube;
pub mod sphere;
pub mod transform;
pub mod wedge;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

pub use attachment::rotation_quadrant;
pub use catalog::GeometryCatalog;
pub use transform::Transform;

// ============================================================================
// GEOMETRY KIND
// ============================================================================

/// Closed set of shapes, selected per block type by its configured geometry id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Cube,
    Wedge,
    Sphere,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 3] = [GeometryKind::Cube, GeometryKind::Wedge, GeometryKind::Sphere];

    /// Maps a configuration geometry id (1 = cube, 2 = wedge, 3 = sphere).
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(GeometryKind::Cube),
            2 => Some(GeometryKind::Wedge),
            3 => Some(GeometryKind::Sphere),
            _ => None,
        }
    }

    pub fn id(self) -> u32 {
        match self {
            GeometryKind::Cube => 1,
            GeometryKind::Wedge => 2,
            GeometryKind::Sphere => 3,
        }
    }

    /// Number of material slots.
    pub fn face_count(self) -> usize {
        match self {
            GeometryKind::Cube => cube::FACE_COUNT,
            GeometryKind::Wedge => wedge::FACE_COUNT,
            GeometryKind::Sphere => sphere::FACE_COUNT,
        }
    }

    /// Whether items of this shape change on every simulation tick.
    pub fn is_dynamic(self) -> bool {
        matches!(self, GeometryKind::Sphere)
    }

    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Cube => "cube",
            GeometryKind::Wedge => "wedge",
            GeometryKind::Sphere => "sphere",
        }
    }
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// MESH DATA
// ============================================================================

/// One triangle of a shape's local mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTriangle {
    pub positions: [DVec3; 3],
    pub uvs: [DVec2; 3],
    /// Material slot the triangle is drawn with
    pub material_slot: usize,
}

impl MeshTriangle {
    /// Unnormalized face normal from the winding order.
    pub fn normal(&self) -> DVec3 {
        let [a, b, c] = self.positions;
        (b - a).cross(c - a)
    }

    pub fn centroid(&self) -> DVec3 {
        let [a, b, c] = self.positions;
        (a + b + c) / 3.0
    }

    /// Interpolates the vertex UVs at barycentric `(u, v)`, where `u` weights
    /// the second vertex and `v` the third.
    pub fn uv_at(&self, u: f64, v: f64) -> DVec2 {
        let [uv0, uv1, uv2] = self.uvs;
        uv0 * (1.0 - u - v) + uv1 * u + uv2 * v
    }
}

/// A face polygon that can be culled when it coincides with a neighbor's face.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyFace {
    /// Material slot hidden when the face is covered
    pub slot: usize,
    /// Corners in local space
    pub corners: Vec<DVec3>,
}

/// Static per-shape data shared by every item of that shape.
#[derive(Debug, Clone)]
pub struct ShapeMesh {
    kind: GeometryKind,
    triangles: Vec<MeshTriangle>,
    vertices: Vec<DVec3>,
    faces: Vec<AdjacencyFace>,
}

impl ShapeMesh {
    pub fn new(
        kind: GeometryKind,
        triangles: Vec<MeshTriangle>,
        vertices: Vec<DVec3>,
        faces: Vec<AdjacencyFace>,
    ) -> Self {
        Self {
            kind,
            triangles,
            vertices,
            faces,
        }
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn triangles(&self) -> &[MeshTriangle] {
        &self.triangles
    }

    pub fn triangle(&self, index: usize) -> Option<&MeshTriangle> {
        self.triangles.get(index)
    }

    /// Unique corner positions in local space.
    pub fn local_vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Faces eligible for hidden-face culling, in slot order.
    pub fn adjacency_faces(&self) -> &[AdjacencyFace] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.kind.face_count()
    }
}
