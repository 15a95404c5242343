//! Geometry catalog: the shared mesh data for every shape, built once.

use glam::{DVec2, DVec3};

use super::{GeometryKind, ShapeMesh, Transform, attachment, cube, sphere, wedge};
use crate::config::EngineConfig;

/// Shape meshes sized for the configured item spacing.
#[derive(Debug, Clone)]
pub struct GeometryCatalog {
    cube: ShapeMesh,
    wedge: ShapeMesh,
    sphere: ShapeMesh,
}

impl GeometryCatalog {
    pub fn new(config: &EngineConfig) -> Self {
        let size = config.item_size();
        Self {
            cube: cube::build(size),
            wedge: wedge::build(size),
            sphere: sphere::build(size / 2.0, config.sphere_segments, config.sphere_rings),
        }
    }

    pub fn mesh(&self, kind: GeometryKind) -> &ShapeMesh {
        match kind {
            GeometryKind::Cube => &self.cube,
            GeometryKind::Wedge => &self.wedge,
            GeometryKind::Sphere => &self.sphere,
        }
    }

    pub fn local_vertices(&self, kind: GeometryKind) -> &[DVec3] {
        self.mesh(kind).local_vertices()
    }

    /// World frame for a `new_kind` item attached to `triangle` of an item of
    /// `parent_kind` at `parent`. `None` if that triangle refuses attachments.
    pub fn resolve_attachment(
        &self,
        parent_kind: GeometryKind,
        parent: &Transform,
        new_kind: GeometryKind,
        triangle: usize,
        uv: DVec2,
    ) -> Option<Transform> {
        attachment::resolve_attachment(parent, self.mesh(parent_kind), new_kind, triangle, uv)
    }
}

impl Default for GeometryCatalog {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
