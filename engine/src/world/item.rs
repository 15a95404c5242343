use glam::DVec3;
use rand::Rng;

use super::types::{FaceMaterial, FaceUpdate, ItemId, ItemState, PlacedItem};
use crate::config::{BlockType, BlockTypeId, EngineConfig, MaterialId};
use crate::geometry::{GeometryKind, ShapeMesh, Transform};

/// What a simulation step did to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub moved: bool,
    pub despawn: bool,
}

/// A placed block.
///
/// `original_materials` is captured from the block type at creation and never
/// changes; `faces` tracks what each slot currently draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    block_type: BlockTypeId,
    geometry: GeometryKind,
    transform: Transform,
    original_materials: Vec<MaterialId>,
    faces: Vec<FaceMaterial>,
    state: ItemState,
    rise_speed: Option<f64>,
}

impl Item {
    pub fn new(id: ItemId, block_type: &BlockType, transform: Transform) -> Self {
        Self {
            id,
            block_type: block_type.id,
            geometry: block_type.geometry,
            transform,
            original_materials: block_type.face_materials.clone(),
            faces: block_type
                .face_materials
                .iter()
                .map(|&m| FaceMaterial::Shown(m))
                .collect(),
            state: ItemState::Active,
            rise_speed: None,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn block_type(&self) -> BlockTypeId {
        self.block_type
    }

    pub fn geometry(&self) -> GeometryKind {
        self.geometry
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn position(&self) -> DVec3 {
        self.transform.position
    }

    /// XYZ Euler angles in radians.
    pub fn rotation_euler(&self) -> DVec3 {
        self.transform.euler()
    }

    pub fn faces(&self) -> &[FaceMaterial] {
        &self.faces
    }

    pub fn face(&self, slot: usize) -> Option<FaceMaterial> {
        self.faces.get(slot).copied()
    }

    pub fn original_materials(&self) -> &[MaterialId] {
        &self.original_materials
    }

    pub fn hidden_slots(&self) -> Vec<usize> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, face)| face.is_hidden())
            .map(|(slot, _)| slot)
            .collect()
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ItemState::Active
    }

    /// Rise speed in units per tick, drawn on the first tick of a sphere.
    pub fn rise_speed(&self) -> Option<f64> {
        self.rise_speed
    }

    pub fn world_vertices<'a>(&'a self, mesh: &'a ShapeMesh) -> impl Iterator<Item = DVec3> + 'a {
        mesh.local_vertices()
            .iter()
            .map(move |&v| self.transform.transform_point(v))
    }

    /// Adjacency faces as `(slot, world corners)`.
    pub fn world_faces(&self, mesh: &ShapeMesh) -> Vec<(usize, Vec<DVec3>)> {
        mesh.adjacency_faces()
            .iter()
            .map(|face| {
                let corners = face
                    .corners
                    .iter()
                    .map(|&c| self.transform.transform_point(c))
                    .collect();
                (face.slot, corners)
            })
            .collect()
    }

    pub fn placed_record(&self) -> PlacedItem {
        PlacedItem {
            id: self.id,
            block_type: self.block_type,
            geometry: self.geometry,
            position: self.position(),
            rotation: self.rotation_euler(),
            faces: self.faces.clone(),
        }
    }

    pub(crate) fn hide_face(&mut self, slot: usize) -> Option<FaceUpdate> {
        self.set_face(slot, FaceMaterial::Hidden)
    }

    pub(crate) fn show_face(&mut self, slot: usize) -> Option<FaceUpdate> {
        let original = *self.original_materials.get(slot)?;
        self.set_face(slot, FaceMaterial::Shown(original))
    }

    fn set_face(&mut self, slot: usize, material: FaceMaterial) -> Option<FaceUpdate> {
        let face = self.faces.get_mut(slot)?;
        *face = material;
        Some(FaceUpdate {
            item: self.id,
            slot,
            material,
        })
    }

    pub(crate) fn mark_removed(&mut self) {
        self.state = ItemState::Removed;
    }

    /// Per-tick behavior. Spheres rise at a fixed per-instance speed and may
    /// despawn; other shapes are static.
    pub(crate) fn advance(&mut self, rng: &mut impl Rng, config: &EngineConfig) -> TickOutcome {
        if !self.geometry.is_dynamic() || !self.is_active() {
            return TickOutcome::default();
        }
        let speed = *self.rise_speed.get_or_insert_with(|| {
            let (low, high) = config.sphere_rise_speed_thousandths;
            f64::from(rng.gen_range(low..=high)) / 1000.0
        });
        self.transform.position.y += speed;
        TickOutcome {
            moved: true,
            despawn: rng.gen_range(0..config.sphere_despawn_one_in) == 0,
        }
    }
}
