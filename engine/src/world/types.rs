use std::fmt;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::config::{BlockTypeId, MaterialId};
use crate::geometry::GeometryKind;

/// Identifier of an item, unique for the lifetime of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

static_assertions::assert_eq_size!(ItemId, u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a material slot currently draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceMaterial {
    Shown(MaterialId),
    /// Culled because it coincides with a neighbor's face
    Hidden,
}

impl FaceMaterial {
    pub fn is_hidden(self) -> bool {
        matches!(self, FaceMaterial::Hidden)
    }

    pub fn material(self) -> Option<MaterialId> {
        match self {
            FaceMaterial::Shown(id) => Some(id),
            FaceMaterial::Hidden => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Active,
    Removed,
}

/// The triangle a user pointed at, and where on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetFace {
    pub item: ItemId,
    pub triangle: usize,
    pub uv: DVec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub target: TargetFace,
    pub point: DVec3,
    pub distance: f64,
}

/// A pair of coincident faces: `face` on the queried item, `neighbor_face` on `neighbor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceLink {
    pub face: usize,
    pub neighbor: ItemId,
    pub neighbor_face: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceUpdate {
    pub item: ItemId,
    pub slot: usize,
    pub material: FaceMaterial,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    pub id: ItemId,
    pub block_type: BlockTypeId,
    pub geometry: GeometryKind,
    pub position: DVec3,
    /// XYZ Euler angles in radians
    pub rotation: DVec3,
    pub faces: Vec<FaceMaterial>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovedItem {
    pub id: ItemId,
    pub position: DVec3,
}

/// Changes accumulated since the renderer last drained them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderDelta {
    pub placed: Vec<PlacedItem>,
    pub removed: Vec<ItemId>,
    pub moved: Vec<MovedItem>,
    pub face_updates: Vec<FaceUpdate>,
}

impl RenderDelta {
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
            && self.removed.is_empty()
            && self.moved.is_empty()
            && self.face_updates.is_empty()
    }
}
