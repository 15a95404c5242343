//! Spatial index: integer cells → ids of the items inserted there.
//!
//! Cells are keyed x → y → z so that each level can be pruned independently
//! when it empties. An item is filed under the cell of its position at
//! insertion time and stays there even if it moves afterwards; removal uses
//! the recorded cell.

use std::collections::{BTreeSet, HashMap};

use glam::{DVec3, IVec3};

use super::ItemId;

type ZColumn = HashMap<i32, BTreeSet<ItemId>>;
type YPlane = HashMap<i32, ZColumn>;

/// Whether every axis of `position` rounds to a cell coordinate that fits in
/// an `i32`. Positions outside this range cannot be indexed.
pub fn position_in_range(position: DVec3) -> bool {
    let rounded = (position + DVec3::splat(0.5)).floor();
    rounded
        .to_array()
        .iter()
        .all(|&v| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&v))
}

/// Rounds half-up on each axis, so 0.5 → 1 and -0.5 → 0.
///
/// Out-of-range axes saturate; see [`position_in_range`].
pub fn cell_for_position(position: DVec3) -> IVec3 {
    let rounded = (position + DVec3::splat(0.5)).floor();
    IVec3::new(rounded.x as i32, rounded.y as i32, rounded.z as i32)
}

#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    cells: HashMap<i32, YPlane>,
    placements: HashMap<ItemId, IVec3>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files `id` under the cell containing `position`. Re-inserting an id
    /// moves it to the new cell.
    pub fn insert(&mut self, id: ItemId, position: DVec3) -> IVec3 {
        if self.placements.contains_key(&id) {
            self.remove(id);
        }
        let cell = cell_for_position(position);
        self.cells
            .entry(cell.x)
            .or_default()
            .entry(cell.y)
            .or_default()
            .entry(cell.z)
            .or_default()
            .insert(id);
        self.placements.insert(id, cell);
        cell
    }

    /// Removes `id` from the cell it was inserted under. Unknown ids are ignored.
    pub fn remove(&mut self, id: ItemId) -> Option<IVec3> {
        let cell = self.placements.remove(&id)?;

        let Some(plane) = self.cells.get_mut(&cell.x) else {
            return Some(cell);
        };
        if let Some(column) = plane.get_mut(&cell.y) {
            if let Some(ids) = column.get_mut(&cell.z) {
                ids.remove(&id);
                if ids.is_empty() {
                    column.remove(&cell.z);
                }
            }
            if column.is_empty() {
                plane.remove(&cell.y);
            }
        }
        if plane.is_empty() {
            self.cells.remove(&cell.x);
        }
        Some(cell)
    }

    pub fn items_at(&self, cell: IVec3) -> Vec<ItemId> {
        self.cell_ids(cell)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn items_at_position(&self, position: DVec3) -> Vec<ItemId> {
        self.items_at(cell_for_position(position))
    }

    /// Ids in every cell within Chebyshev distance `radius` of `center`,
    /// ordered by x, then y, then z, then id.
    pub fn items_near(&self, center: IVec3, radius: i32) -> Vec<ItemId> {
        let mut out = Vec::new();
        let span = |c: i32| c.saturating_sub(radius)..=c.saturating_add(radius);
        for x in span(center.x) {
            let Some(plane) = self.cells.get(&x) else {
                continue;
            };
            for y in span(center.y) {
                let Some(column) = plane.get(&y) else {
                    continue;
                };
                for z in span(center.z) {
                    if let Some(ids) = column.get(&z) {
                        out.extend(ids.iter().copied());
                    }
                }
            }
        }
        out
    }

    /// The cell `id` was inserted under.
    pub fn cell_of(&self, id: ItemId) -> Option<IVec3> {
        self.placements.get(&id).copied()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.placements.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells
            .values()
            .flat_map(|plane| plane.values())
            .map(|column| column.len())
            .sum()
    }

    /// Number of populated x keys; exposes level pruning to tests.
    pub fn x_levels(&self) -> usize {
        self.cells.len()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.placements.clear();
    }

    fn cell_ids(&self, cell: IVec3) -> Option<&BTreeSet<ItemId>> {
        self.cells.get(&cell.x)?.get(&cell.y)?.get(&cell.z)
    }
}
