//! Physics module
//!
//! Geometric queries the placement engine is built on. No rigid-body
//! simulation: items are static except for the sphere drift handled by the
//! world tick.
//!
//! # Unit System
//!
//! **1 unit = 1 block.** Every shape fits inside a unit cube centered on its
//! origin, shrunk by the configured item spacing.
//!
//! # Submodules
//!
//! - [`collision`] - Ray-triangle and ray-mesh intersection
//! - [`containment`] - Six-probe point-in-solid test

pub mod collision;
pub mod containment;

pub use collision::{HitInfo, TriangleHit, ray_cast_mesh, ray_hits_mesh, ray_triangle_intersect};
pub use containment::point_in_solid;
