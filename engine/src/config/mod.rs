//! Configuration Module
//!
//! Static inputs to the engine:
//!
//! - [`engine_config`] - Tunable constants (spacing, epsilons, tick rate, sphere behavior)
//! - [`block_catalog`] - Block types and materials loaded from the JSON catalog files

pub mod block_catalog;
pub mod engine_config;

pub use block_catalog::{
    BlockCatalog, BlockCatalogBuilder, BlockType, BlockTypeId, Material, MaterialId, MaterialKind,
};
pub use engine_config::EngineConfig;
