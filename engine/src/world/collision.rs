//! Collision resolution for placement candidates.
//!
//! Two passes over the neighbors in the candidate's 3x3x3 cell block:
//! 1. Every candidate vertex is tested against every neighbor's solid.
//! 2. Every neighbor vertex, pulled toward the neighbor's origin by the
//!    shrink factor, is tested against the candidate's solid.
//!
//! Pass 2 catches a neighbor poking into the candidate when no candidate
//! vertex lies inside the neighbor. The shrink keeps vertices that sit exactly
//! on a shared face from counting as inside.

use std::collections::BTreeMap;

use super::item::Item;
use super::spatial_index::{SpatialIndex, cell_for_position};
use super::types::ItemId;
use crate::geometry::GeometryCatalog;
use crate::physics::point_in_solid;

pub struct CollisionResolver<'a> {
    items: &'a BTreeMap<ItemId, Item>,
    index: &'a SpatialIndex,
    geometry: &'a GeometryCatalog,
    shrink_factor: f64,
}

impl<'a> CollisionResolver<'a> {
    pub fn new(
        items: &'a BTreeMap<ItemId, Item>,
        index: &'a SpatialIndex,
        geometry: &'a GeometryCatalog,
        shrink_factor: f64,
    ) -> Self {
        Self {
            items,
            index,
            geometry,
            shrink_factor,
        }
    }

    pub fn would_collide(&self, candidate: &Item) -> bool {
        self.first_collision(candidate).is_some()
    }

    /// The first neighbor found overlapping `candidate`, if any.
    pub fn first_collision(&self, candidate: &Item) -> Option<ItemId> {
        let candidate_mesh = self.geometry.mesh(candidate.geometry());
        let neighbors: Vec<&Item> = self
            .index
            .items_near(cell_for_position(candidate.position()), 1)
            .into_iter()
            .filter(|&id| id != candidate.id())
            .filter_map(|id| self.items.get(&id))
            .collect();

        for neighbor in &neighbors {
            let mesh = self.geometry.mesh(neighbor.geometry());
            if candidate
                .world_vertices(candidate_mesh)
                .any(|v| point_in_solid(v, neighbor.transform(), mesh))
            {
                return Some(neighbor.id());
            }
        }

        for neighbor in &neighbors {
            let mesh = self.geometry.mesh(neighbor.geometry());
            let pokes_in = mesh.local_vertices().iter().any(|&v| {
                let shrunk = neighbor.transform().transform_point(v * self.shrink_factor);
                point_in_solid(shrunk, candidate.transform(), candidate_mesh)
            });
            if pokes_in {
                return Some(neighbor.id());
            }
        }

        None
    }
}
