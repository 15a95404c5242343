//! Block Catalog
//!
//! Block types and materials, loaded once from `item_types_config.json` and
//! `materials_config.json` and looked up by id afterwards.
//!
//! ## File formats
//!
//! ```text
//! item_types_config.json   [{ "id": 201, "geometry_id": 1, "sides": [3, 3, 4, 5, 3, 3] }, ...]
//! materials_config.json    { "3": { "type": "phong", "params": { ... } }, ... }
//! ```
//!
//! `geometry_id` may be a number or a numeric string. A type listing a single
//! material gets it on every face slot of its geometry.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::GeometryKind;

/// Identifier of a block type in the catalog.
pub type BlockTypeId = u32;
/// Identifier of a material in the catalog.
pub type MaterialId = u32;

/// Shading model requested for a material. Appearance is the renderer's concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Basic,
    Phong,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub id: MaterialId,
    pub kind: MaterialKind,
    /// Free-form renderer parameters (color, texture map, transparency)
    pub params: serde_json::Value,
}

/// A placeable block type: one geometry plus one material per face slot.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockType {
    pub id: BlockTypeId,
    pub geometry: GeometryKind,
    /// Material per face slot, always `geometry.face_count()` long
    pub face_materials: Vec<MaterialId>,
}

#[derive(Deserialize)]
struct RawBlockType {
    id: BlockTypeId,
    geometry_id: RawGeometryId,
    sides: Vec<MaterialId>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawGeometryId {
    Number(u32),
    Text(String),
}

impl RawGeometryId {
    fn resolve(&self) -> Option<GeometryKind> {
        match self {
            RawGeometryId::Number(id) => GeometryKind::from_id(*id),
            RawGeometryId::Text(text) => text.trim().parse().ok().and_then(GeometryKind::from_id),
        }
    }

    fn describe(&self) -> String {
        match self {
            RawGeometryId::Number(id) => id.to_string(),
            RawGeometryId::Text(text) => format!("{text:?}"),
        }
    }
}

#[derive(Deserialize)]
struct RawMaterial {
    #[serde(rename = "type")]
    kind: MaterialKind,
    #[serde(default)]
    params: serde_json::Value,
}

/// Validated, immutable catalog of block types and materials.
#[derive(Clone, Debug, Default)]
pub struct BlockCatalog {
    block_types: HashMap<BlockTypeId, BlockType>,
    materials: HashMap<MaterialId, Material>,
}

impl BlockCatalog {
    /// Starts an in-code catalog definition.
    pub fn builder() -> BlockCatalogBuilder {
        BlockCatalogBuilder::default()
    }

    /// Parses both catalog documents and validates every cross reference.
    pub fn from_json(item_types_json: &str, materials_json: &str) -> Result<Self, ConfigError> {
        let raw_materials: HashMap<String, RawMaterial> = serde_json::from_str(materials_json)
            .map_err(|source| ConfigError::Json {
                context: "materials config",
                source,
            })?;
        let raw_types: Vec<RawBlockType> =
            serde_json::from_str(item_types_json).map_err(|source| ConfigError::Json {
                context: "item types config",
                source,
            })?;

        let mut builder = BlockCatalogBuilder::default();
        for (key, raw) in raw_materials {
            let id: MaterialId = key
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidMaterialId(key.clone()))?;
            builder.materials.push(Material {
                id,
                kind: raw.kind,
                params: raw.params,
            });
        }
        for raw in raw_types {
            let geometry = raw
                .geometry_id
                .resolve()
                .ok_or_else(|| ConfigError::UnknownGeometry {
                    block_type: raw.id,
                    geometry: raw.geometry_id.describe(),
                })?;
            builder.block_types.push((raw.id, geometry, raw.sides));
        }
        builder.build()
    }

    /// Loads the two catalog files from disk.
    pub fn load(
        item_types_path: impl AsRef<Path>,
        materials_path: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        let read = |path: &Path| {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        };
        let item_types_path = item_types_path.as_ref();
        let catalog = Self::from_json(&read(item_types_path)?, &read(materials_path.as_ref())?)?;
        log::info!(
            "Loaded {} block types and {} materials from {}",
            catalog.block_types.len(),
            catalog.materials.len(),
            item_types_path.display()
        );
        Ok(catalog)
    }

    /// Looks up a block type.
    pub fn get(&self, id: BlockTypeId) -> Option<&BlockType> {
        self.block_types.get(&id)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(&id)
    }

    pub fn contains(&self, id: BlockTypeId) -> bool {
        self.block_types.contains_key(&id)
    }

    /// All block type ids in ascending order.
    pub fn block_type_ids(&self) -> Vec<BlockTypeId> {
        let mut ids: Vec<_> = self.block_types.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.block_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.block_types.is_empty()
    }
}

/// Collects materials and block types, then validates them in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct BlockCatalogBuilder {
    materials: Vec<Material>,
    block_types: Vec<(BlockTypeId, GeometryKind, Vec<MaterialId>)>,
}

impl BlockCatalogBuilder {
    /// Adds a material with empty renderer parameters.
    pub fn material(mut self, id: MaterialId, kind: MaterialKind) -> Self {
        self.materials.push(Material {
            id,
            kind,
            params: serde_json::Value::Null,
        });
        self
    }

    /// Adds a block type. `sides` may hold one material for every slot.
    pub fn block_type(
        mut self,
        id: BlockTypeId,
        geometry: GeometryKind,
        sides: impl Into<Vec<MaterialId>>,
    ) -> Self {
        self.block_types.push((id, geometry, sides.into()));
        self
    }

    /// Expands single-material types and checks every reference.
    pub fn build(self) -> Result<BlockCatalog, ConfigError> {
        let materials: HashMap<MaterialId, Material> =
            self.materials.into_iter().map(|m| (m.id, m)).collect();

        let mut block_types = HashMap::with_capacity(self.block_types.len());
        for (id, geometry, sides) in self.block_types {
            let expected = geometry.face_count();
            let face_materials = if sides.len() == 1 {
                vec![sides[0]; expected]
            } else if sides.len() == expected {
                sides
            } else {
                return Err(ConfigError::FaceCountMismatch {
                    block_type: id,
                    expected,
                    found: sides.len(),
                });
            };
            if let Some(&missing) = face_materials.iter().find(|m| !materials.contains_key(m)) {
                return Err(ConfigError::UnknownMaterial {
                    block_type: id,
                    material: missing,
                });
            }
            let block_type = BlockType {
                id,
                geometry,
                face_materials,
            };
            if block_types.insert(id, block_type).is_some() {
                return Err(ConfigError::DuplicateBlockType(id));
            }
        }

        Ok(BlockCatalog {
            block_types,
            materials,
        })
    }
}
