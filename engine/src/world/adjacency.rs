//! Face adjacency: finding faces that coincide with a neighbor's face so both
//! can be culled.

use std::collections::BTreeMap;

use glam::DVec3;

use super::item::Item;
use super::spatial_index::{SpatialIndex, cell_for_position};
use super::types::{FaceLink, FaceUpdate, ItemId};
use crate::geometry::GeometryCatalog;

/// True when every corner of `face` has a corner of `other` within `epsilon`
/// on all three axes.
pub fn faces_coincide(face: &[DVec3], other: &[DVec3], epsilon: f64) -> bool {
    face.iter().all(|&corner| {
        other
            .iter()
            .any(|&candidate| (corner - candidate).abs().max_element() <= epsilon)
    })
}

pub struct AdjacencyMatcher<'a> {
    items: &'a BTreeMap<ItemId, Item>,
    index: &'a SpatialIndex,
    geometry: &'a GeometryCatalog,
    epsilon: f64,
}

impl<'a> AdjacencyMatcher<'a> {
    pub fn new(
        items: &'a BTreeMap<ItemId, Item>,
        index: &'a SpatialIndex,
        geometry: &'a GeometryCatalog,
        epsilon: f64,
    ) -> Self {
        Self {
            items,
            index,
            geometry,
            epsilon,
        }
    }

    /// Coincident face pairs between `item` and its neighbors, at most one
    /// per neighbor.
    pub fn connected_faces(&self, item: &Item) -> Vec<FaceLink> {
        let own_faces = item.world_faces(self.geometry.mesh(item.geometry()));
        if own_faces.is_empty() {
            return Vec::new();
        }

        let mut links = Vec::new();
        for neighbor_id in self.index.items_near(cell_for_position(item.position()), 1) {
            if neighbor_id == item.id() {
                continue;
            }
            let Some(neighbor) = self.items.get(&neighbor_id) else {
                continue;
            };
            let neighbor_faces = neighbor.world_faces(self.geometry.mesh(neighbor.geometry()));

            'neighbor: for (neighbor_slot, neighbor_corners) in &neighbor_faces {
                for (slot, corners) in &own_faces {
                    if faces_coincide(corners, neighbor_corners, self.epsilon) {
                        links.push(FaceLink {
                            face: *slot,
                            neighbor: neighbor_id,
                            neighbor_face: *neighbor_slot,
                        });
                        break 'neighbor;
                    }
                }
            }
        }
        links
    }
}

/// Hides both sides of every link.
pub fn hide_connected_faces(
    items: &mut BTreeMap<ItemId, Item>,
    item: ItemId,
    links: &[FaceLink],
) -> Vec<FaceUpdate> {
    let mut updates = Vec::with_capacity(links.len() * 2);
    for link in links {
        updates.extend(items.get_mut(&item).and_then(|i| i.hide_face(link.face)));
        updates.extend(
            items
                .get_mut(&link.neighbor)
                .and_then(|n| n.hide_face(link.neighbor_face)),
        );
    }
    updates
}

/// Restores both sides of every link to their original materials.
pub fn show_connected_faces(
    items: &mut BTreeMap<ItemId, Item>,
    item: ItemId,
    links: &[FaceLink],
) -> Vec<FaceUpdate> {
    let mut updates = Vec::with_capacity(links.len() * 2);
    for link in links {
        updates.extend(items.get_mut(&item).and_then(|i| i.show_face(link.face)));
        updates.extend(
            items
                .get_mut(&link.neighbor)
                .and_then(|n| n.show_face(link.neighbor_face)),
        );
    }
    updates
}
