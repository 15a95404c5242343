//! Saved World Format
//!
//! JSON document holding the player position and one row per item:
//!
//! ```text
//! {
//!   "player_position": { "x": 0.0, "y": 1.6, "z": 4.0, "r": 0.0 },
//!   "world": [[px, py, pz, rx, ry, rz, block_type_id], ...]
//! }
//! ```
//!
//! Rotations are XYZ Euler angles in radians. Row values may be numbers or
//! numeric strings; block type ids must be non-negative integers.
//!
//! The world signals a [`PersistenceSink`] after every placement and removal.
//! Sinks are fire-and-forget: failures are logged, never returned into the
//! simulation.

use std::path::{Path, PathBuf};

use glam::DVec3;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};

use crate::config::BlockTypeId;
use crate::error::PersistenceError;
use crate::world::position_in_range;

// ============================================================================
// DOCUMENT
// ============================================================================

/// Where the player stood when the world was saved. Carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Heading in radians
    pub r: f64,
}

/// One persisted item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedItem {
    pub position: DVec3,
    /// XYZ Euler angles in radians
    pub rotation: DVec3,
    pub block_type: BlockTypeId,
}

impl SavedItem {
    pub fn new(position: DVec3, rotation: DVec3, block_type: BlockTypeId) -> Self {
        Self {
            position,
            rotation,
            block_type,
        }
    }

    fn from_row(index: usize, row: &[serde_json::Value]) -> Result<Self, PersistenceError> {
        let malformed = |reason: String| PersistenceError::MalformedRow { index, reason };
        if row.len() != 7 {
            return Err(malformed(format!("expected 7 values, found {}", row.len())));
        }

        let mut values = [0.0; 7];
        for (slot, value) in values.iter_mut().zip(row) {
            *slot = number(value).ok_or_else(|| malformed(format!("{value} is not a number")))?;
        }

        let raw_type = values[6];
        if raw_type.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&raw_type) {
            return Err(malformed(format!("{raw_type} is not a block type id")));
        }

        let position = DVec3::new(values[0], values[1], values[2]);
        if !position_in_range(position) {
            return Err(malformed(format!("position {position} is outside the world grid")));
        }

        Ok(Self {
            position,
            rotation: DVec3::new(values[3], values[4], values[5]),
            block_type: raw_type as BlockTypeId,
        })
    }
}

impl Serialize for SavedItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_tuple(7)?;
        for value in self.position.to_array().iter().chain(&self.rotation.to_array()) {
            row.serialize_element(value)?;
        }
        row.serialize_element(&self.block_type)?;
        row.end()
    }
}

fn number(value: &serde_json::Value) -> Option<f64> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// The whole saved document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SavedWorld {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_position: Option<PlayerPosition>,
    pub world: Vec<SavedItem>,
}

static_assertions::assert_impl_all!(SavedWorld: Send, Sync, Clone);

#[derive(Deserialize)]
struct RawSavedWorld {
    #[serde(default)]
    player_position: Option<PlayerPosition>,
    #[serde(default)]
    world: Vec<Vec<serde_json::Value>>,
}

impl SavedWorld {
    /// A world holding a single item of `block_type` at the origin.
    pub fn seed(block_type: BlockTypeId) -> Self {
        Self {
            player_position: None,
            world: vec![SavedItem::new(DVec3::ZERO, DVec3::ZERO, block_type)],
        }
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let raw: RawSavedWorld = serde_json::from_str(json)?;
        let world = raw
            .world
            .iter()
            .enumerate()
            .map(|(index, row)| SavedItem::from_row(index, row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            player_position: raw.player_position,
            world,
        })
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reads a saved world. A missing file yields `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>, PersistenceError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let world = Self::from_json(&json)?;
        log::info!("Loaded {} items from {}", world.world.len(), path.display());
        Ok(Some(world))
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let io_err = |source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_json()?).map_err(io_err)?;
        Ok(())
    }
}

// ============================================================================
// SINKS
// ============================================================================

/// Receives the saved-world document whenever the world changes.
pub trait PersistenceSink: Send {
    fn persist(&mut self, world: &SavedWorld);
}

/// Writes the document to a JSON file, overwriting it each time.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
    writes: usize,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writes: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PersistenceSink for JsonFileSink {
    fn persist(&mut self, world: &SavedWorld) {
        match world.save(&self.path) {
            Ok(()) => {
                self.writes += 1;
                log::debug!("Saved {} items to {}", world.world.len(), self.path.display());
            }
            Err(err) => log::warn!("Failed to save world: {err}"),
        }
    }
}
