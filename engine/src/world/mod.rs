//! World Module
//!
//! Live items, the spatial index they are filed in, and the placement,
//! adjacency and collision machinery that operates on them.
//!
//! [`BlockWorld`] is the entry point; the other types are exposed for
//! callers that want to query or test one piece in isolation.

pub mod adjacency;
pub mod block_world;
pub mod collision;
pub mod item;
pub mod spatial_index;
pub mod tick;
pub mod types;

pub use adjacency::{AdjacencyMatcher, faces_coincide};
pub use block_world::BlockWorld;
pub use collision::CollisionResolver;
pub use item::{Item, TickOutcome};
pub use spatial_index::{SpatialIndex, cell_for_position, position_in_range};
pub use tick::TickThrottle;
pub use types::{
    FaceLink, FaceMaterial, FaceUpdate, ItemId, ItemState, MovedItem, PickHit, PlacedItem,
    RenderDelta, TargetFace,
};
