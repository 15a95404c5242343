//! Error Types
//!
//! Placement and removal failures are ordinary outcomes of user interaction:
//! the world reports them to its caller and keeps simulating. Configuration
//! and persistence failures happen at load time and are fatal to start-up.

use std::path::PathBuf;

use glam::DVec3;
use thiserror::Error;

use crate::config::{BlockTypeId, MaterialId};
use crate::world::ItemId;

/// Why a placement request produced no new item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The targeted face does not accept attachments for this geometry pair.
    #[error("triangle {triangle} of item {item} does not accept attachments")]
    AttachmentRefused { item: ItemId, triangle: usize },
    /// The candidate would overlap an existing item.
    #[error("candidate overlaps item {with}")]
    CollisionDetected { with: ItemId },
    /// The targeted item is not live in this world.
    #[error("item {0} is not in the world")]
    UnknownItem(ItemId),
    /// The requested block type has no configuration.
    #[error("unknown block type {0}")]
    UnknownBlockType(BlockTypeId),
}

/// Why a removal request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemovalError {
    /// The world must always keep at least one item.
    #[error("refusing to remove the last item in the world")]
    LastItem,
    #[error("item {0} is not in the world")]
    UnknownItem(ItemId),
}

/// Configuration integrity faults, surfaced when configuration or a saved
/// world is loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown block type {0}")]
    UnknownBlockType(BlockTypeId),
    #[error("block type {block_type} references unknown material {material}")]
    UnknownMaterial {
        block_type: BlockTypeId,
        material: MaterialId,
    },
    #[error("block type {block_type} references unknown geometry {geometry}")]
    UnknownGeometry { block_type: BlockTypeId, geometry: String },
    #[error("block type {block_type} lists {found} face materials, geometry has {expected} faces")]
    FaceCountMismatch {
        block_type: BlockTypeId,
        expected: usize,
        found: usize,
    },
    #[error("block type {0} is defined more than once")]
    DuplicateBlockType(BlockTypeId),
    #[error("invalid material id {0:?}")]
    InvalidMaterialId(String),
    #[error("saved item {index} at {position} is outside the world grid")]
    PositionOutOfRange { index: usize, position: DVec3 },
    #[error("invalid config parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
    #[error("JSON error in {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures reading or writing a saved world document.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("world row {index} is malformed: {reason}")]
    MalformedRow { index: usize, reason: String },
}

/// Top-level error for loading and running a world from disk.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type EngineResult<T> = Result<T, EngineError>;
