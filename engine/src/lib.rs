//! Voxel Builder Engine
//!
//! Headless core of a block-building world: items (cubes, wedges and spheres)
//! snap against a targeted face of an existing item, are refused when they
//! would overlap a neighbor, and cull faces that coincide with a neighbor's
//! face. Spheres drift upward and despawn at random on a throttled tick.
//!
//! # Modules
//!
//! - [`config`] - Engine constants and the block type / material catalog
//! - [`geometry`] - Shape meshes, transforms and attachment rules
//! - [`physics`] - Ray-triangle queries and point-in-solid containment
//! - [`world`] - Items, the spatial index, and the [`BlockWorld`] orchestrator
//! - [`persistence`] - Saved-world JSON document and persistence sinks
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```
//! use voxel_builder_engine::config::{BlockCatalog, EngineConfig, MaterialKind};
//! use voxel_builder_engine::geometry::GeometryKind;
//! use voxel_builder_engine::world::{BlockWorld, ItemId, TargetFace};
//! use glam::DVec2;
//!
//! let blocks = BlockCatalog::builder()
//!     .material(1, MaterialKind::Basic)
//!     .block_type(201, GeometryKind::Cube, [1])
//!     .build()
//!     .unwrap();
//! let mut world = BlockWorld::new(EngineConfig::default(), blocks).unwrap();
//!
//! // Triangle 4 is the first half of the seed cube's top face
//! let target = TargetFace { item: ItemId(1), triangle: 4, uv: DVec2::new(0.5, 0.5) };
//! let placed = world.place(201, &target).unwrap();
//! assert_eq!(world.connected_faces(placed).len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod persistence;
pub mod physics;
pub mod world;

pub use config::{BlockCatalog, EngineConfig};
pub use error::{ConfigError, EngineError, EngineResult, PersistenceError, PlacementError, RemovalError};
pub use geometry::{GeometryKind, Transform};
pub use persistence::{JsonFileSink, PersistenceSink, SavedItem, SavedWorld};
pub use world::{BlockWorld, ItemId, TargetFace};
