//! Block World
//!
//! Owns every item and sequences the operations that change them:
//! placement, removal, bulk restore from a save, and the simulation tick.
//!
//! ## Invariants
//! - Every live item is filed in the spatial index under the cell of its
//!   position at insertion time.
//! - Placed items never overlap an existing item (restored items are trusted).
//! - The world never holds fewer than one item.
//! - A face culled against a neighbor is restored when that neighbor goes.
//!
//! Renderers pull accumulated changes with [`BlockWorld::drain_changes`].

use std::collections::BTreeMap;
use std::time::Instant;

use glam::DVec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::adjacency::{self, AdjacencyMatcher};
use super::collision::CollisionResolver;
use super::item::Item;
use super::spatial_index::{SpatialIndex, position_in_range};
use super::tick::TickThrottle;
use super::types::{FaceLink, ItemId, MovedItem, PickHit, RenderDelta, TargetFace};
use crate::config::{BlockCatalog, BlockTypeId, EngineConfig};
use crate::error::{ConfigError, PlacementError, RemovalError};
use crate::geometry::{GeometryCatalog, Transform};
use crate::persistence::{PersistenceSink, PlayerPosition, SavedItem, SavedWorld};
use crate::physics::{point_in_solid, ray_cast_mesh};

pub struct BlockWorld {
    config: EngineConfig,
    blocks: BlockCatalog,
    geometry: GeometryCatalog,
    items: BTreeMap<ItemId, Item>,
    index: SpatialIndex,
    next_id: u64,
    throttle: TickThrottle,
    rng: StdRng,
    changes: RenderDelta,
    sink: Option<Box<dyn PersistenceSink>>,
    player_position: Option<PlayerPosition>,
}

static_assertions::assert_impl_all!(BlockWorld: Send);

impl BlockWorld {
    /// Creates a world holding one item of the configured default block type
    /// at the origin.
    pub fn new(config: EngineConfig, blocks: BlockCatalog) -> Result<Self, ConfigError> {
        let seed = SavedWorld::seed(config.default_block_type);
        Self::from_saved(config, blocks, &seed)
    }

    /// Creates a world from a saved document. An empty document yields the
    /// default seed item.
    pub fn from_saved(
        config: EngineConfig,
        blocks: BlockCatalog,
        saved: &SavedWorld,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if !blocks.contains(config.default_block_type) {
            return Err(ConfigError::UnknownBlockType(config.default_block_type));
        }

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut world = Self {
            geometry: GeometryCatalog::new(&config),
            throttle: TickThrottle::new(config.min_tick_interval()),
            config,
            blocks,
            items: BTreeMap::new(),
            index: SpatialIndex::new(),
            next_id: 1,
            rng,
            changes: RenderDelta::default(),
            sink: None,
            player_position: saved.player_position,
        };
        world.restore_from_saved_state(&saved.world)?;
        Ok(world)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn blocks(&self) -> &BlockCatalog {
        &self.blocks
    }

    pub fn geometry(&self) -> &GeometryCatalog {
        &self.geometry
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Live items in creation order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn player_position(&self) -> Option<PlayerPosition> {
        self.player_position
    }

    pub fn set_player_position(&mut self, position: Option<PlayerPosition>) {
        self.player_position = position;
    }

    pub fn point_in_item(&self, point: DVec3, id: ItemId) -> bool {
        self.items.get(&id).is_some_and(|item| {
            point_in_solid(point, item.transform(), self.geometry.mesh(item.geometry()))
        })
    }

    /// Faces of `id` currently coincident with a neighbor's face.
    pub fn connected_faces(&self, id: ItemId) -> Vec<FaceLink> {
        self.items
            .get(&id)
            .map(|item| self.adjacency().connected_faces(item))
            .unwrap_or_default()
    }

    /// Whether an item of `block_type` at `transform` would overlap anything.
    pub fn would_collide(
        &self,
        block_type: BlockTypeId,
        transform: Transform,
    ) -> Result<bool, PlacementError> {
        let block = self
            .blocks
            .get(block_type)
            .ok_or(PlacementError::UnknownBlockType(block_type))?;
        let candidate = Item::new(ItemId(self.next_id), block, transform);
        Ok(self.collision().would_collide(&candidate))
    }

    /// Closest item triangle hit by a ray, within `max_distance`.
    pub fn pick(&self, origin: DVec3, direction: DVec3, max_distance: f64) -> Option<PickHit> {
        let dir = direction.normalize_or_zero();
        if dir == DVec3::ZERO {
            return None;
        }

        let mut best = None;
        let mut best_dist = max_distance;
        for item in self.items.values() {
            let mesh = self.geometry.mesh(item.geometry());
            if let Some(hit) = ray_cast_mesh(item.transform(), mesh, origin, dir, best_dist) {
                best_dist = hit.distance;
                best = Some(PickHit {
                    target: TargetFace {
                        item: item.id(),
                        triangle: hit.triangle,
                        uv: hit.uv,
                    },
                    point: hit.position,
                    distance: hit.distance,
                });
            }
        }
        best
    }

    /// The saved-world document for the current state.
    pub fn snapshot(&self) -> SavedWorld {
        SavedWorld {
            player_position: self.player_position,
            world: self
                .items
                .values()
                .map(|item| {
                    SavedItem::new(item.position(), item.rotation_euler(), item.block_type())
                })
                .collect(),
        }
    }

    pub fn drain_changes(&mut self) -> RenderDelta {
        std::mem::take(&mut self.changes)
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// Places a new item against the targeted triangle of an existing one.
    pub fn place(
        &mut self,
        block_type: BlockTypeId,
        target: &TargetFace,
    ) -> Result<ItemId, PlacementError> {
        let block = self
            .blocks
            .get(block_type)
            .ok_or(PlacementError::UnknownBlockType(block_type))?;
        let parent = self
            .items
            .get(&target.item)
            .ok_or(PlacementError::UnknownItem(target.item))?;

        let transform = self
            .geometry
            .resolve_attachment(
                parent.geometry(),
                parent.transform(),
                block.geometry,
                target.triangle,
                target.uv,
            )
            .ok_or(PlacementError::AttachmentRefused {
                item: target.item,
                triangle: target.triangle,
            })?;

        let candidate = Item::new(ItemId(self.next_id), block, transform);
        if let Some(with) = self.collision().first_collision(&candidate) {
            log::debug!(
                "Placement of type {} at {:?} blocked by item {}",
                block_type,
                candidate.position(),
                with
            );
            return Err(PlacementError::CollisionDetected { with });
        }

        self.next_id += 1;
        let id = self.insert_item(candidate);
        self.signal_persistence();
        Ok(id)
    }

    /// Removes an item, restoring any faces it had culled. The last item in
    /// the world cannot be removed.
    pub fn remove(&mut self, id: ItemId) -> Result<Item, RemovalError> {
        if !self.items.contains_key(&id) {
            return Err(RemovalError::UnknownItem(id));
        }
        if self.items.len() <= 1 {
            log::debug!("Refusing to remove the last item {}", id);
            return Err(RemovalError::LastItem);
        }
        let item = self.detach_item(id).ok_or(RemovalError::UnknownItem(id))?;
        self.signal_persistence();
        Ok(item)
    }

    /// Replaces the world's contents with saved rows, without collision or
    /// attachment checks. Every block type is validated before anything
    /// changes; an empty row list yields the default seed item.
    pub fn restore_from_saved_state(
        &mut self,
        rows: &[SavedItem],
    ) -> Result<Vec<ItemId>, ConfigError> {
        if let Some(row) = rows.iter().find(|row| !self.blocks.contains(row.block_type)) {
            return Err(ConfigError::UnknownBlockType(row.block_type));
        }
        if let Some(index) = rows.iter().position(|row| !position_in_range(row.position)) {
            return Err(ConfigError::PositionOutOfRange {
                index,
                position: rows[index].position,
            });
        }
        let seed;
        let rows = if rows.is_empty() {
            seed = SavedWorld::seed(self.config.default_block_type);
            &seed.world[..]
        } else {
            rows
        };

        let old_ids: Vec<ItemId> = self.items.keys().copied().collect();
        self.items.clear();
        self.index.clear();
        self.changes.removed.extend(old_ids);

        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(block) = self.blocks.get(row.block_type) else {
                return Err(ConfigError::UnknownBlockType(row.block_type));
            };
            let item = Item::new(
                ItemId(self.next_id),
                block,
                Transform::from_euler(row.position, row.rotation),
            );
            self.next_id += 1;
            ids.push(self.insert_item(item));
        }

        log::info!("Restored {} items", ids.len());
        Ok(ids)
    }

    /// Runs one simulation step if the throttle allows it at `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.throttle.should_tick(now) {
            return false;
        }
        self.step();
        true
    }

    /// One unthrottled simulation step.
    pub fn step(&mut self) {
        let dynamic: Vec<ItemId> = self
            .items
            .values()
            .filter(|item| item.geometry().is_dynamic())
            .map(Item::id)
            .collect();

        let mut despawned = Vec::new();
        for id in dynamic {
            let Some(item) = self.items.get_mut(&id) else {
                continue;
            };
            let outcome = item.advance(&mut self.rng, &self.config);
            if outcome.moved {
                self.changes.moved.push(MovedItem {
                    id,
                    position: item.position(),
                });
            }
            if outcome.despawn {
                despawned.push(id);
            }
        }

        for id in despawned {
            match self.remove(id) {
                Ok(_) => log::debug!("Item {} despawned", id),
                Err(err) => log::debug!("Item {} stays: {}", id, err),
            }
        }
    }

    pub fn set_persistence_sink(&mut self, sink: Box<dyn PersistenceSink>) {
        self.sink = Some(sink);
    }

    /// Hands the current snapshot to the sink regardless of `autosave`.
    pub fn flush_persistence(&mut self) {
        if self.sink.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(sink) = self.sink.as_mut() {
            sink.persist(&snapshot);
        }
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn collision(&self) -> CollisionResolver<'_> {
        CollisionResolver::new(
            &self.items,
            &self.index,
            &self.geometry,
            self.config.collision_shrink_factor,
        )
    }

    fn adjacency(&self) -> AdjacencyMatcher<'_> {
        AdjacencyMatcher::new(
            &self.items,
            &self.index,
            &self.geometry,
            self.config.face_match_epsilon(),
        )
    }

    fn insert_item(&mut self, item: Item) -> ItemId {
        let id = item.id();
        self.index.insert(id, item.position());
        let links = self.adjacency().connected_faces(&item);
        self.items.insert(id, item);

        let updates = adjacency::hide_connected_faces(&mut self.items, id, &links);
        if let Some(item) = self.items.get(&id) {
            self.changes.placed.push(item.placed_record());
        }
        self.changes.face_updates.extend(updates);
        id
    }

    fn detach_item(&mut self, id: ItemId) -> Option<Item> {
        let links = self.adjacency().connected_faces(self.items.get(&id)?);
        let updates = adjacency::show_connected_faces(&mut self.items, id, &links);
        self.changes.face_updates.extend(updates);

        self.index.remove(id);
        let mut item = self.items.remove(&id)?;
        item.mark_removed();
        self.changes.removed.push(id);
        Some(item)
    }

    fn signal_persistence(&mut self) {
        if self.config.autosave {
            self.flush_persistence();
        }
    }
}
