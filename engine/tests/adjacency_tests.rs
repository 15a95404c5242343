//! Adjacency Tests - Face Culling Between Neighbors
//!
//! Checks which faces the world reports as connected and the face updates
//! it emits for renderers.

use std::collections::HashSet;

use glam::DVec2;
use voxel_builder_engine::config::{BlockCatalog, EngineConfig, MaterialKind};
use voxel_builder_engine::geometry::GeometryKind;
use voxel_builder_engine::world::{
    BlockWorld, FaceLink, FaceMaterial, FaceUpdate, ItemId, TargetFace,
};

const CUBE: u32 = 1;
const WEDGE: u32 = 2;
const SEED: ItemId = ItemId(1);

fn world() -> BlockWorld {
    let blocks = BlockCatalog::builder()
        .material(1, MaterialKind::Phong)
        .material(2, MaterialKind::Phong)
        .block_type(CUBE, GeometryKind::Cube, [1])
        .block_type(WEDGE, GeometryKind::Wedge, [2])
        .build()
        .unwrap();
    let config = EngineConfig {
        autosave: false,
        default_block_type: CUBE,
        rng_seed: Some(1),
        ..EngineConfig::default()
    };
    BlockWorld::new(config, blocks).unwrap()
}

fn on(item: ItemId, triangle: usize) -> TargetFace {
    TargetFace {
        item,
        triangle,
        uv: DVec2::new(0.5, 0.5),
    }
}

// ============================================================================
// Connected Face Tests
// ============================================================================

#[test]
fn test_isolated_item_has_no_links() {
    let world = world();
    assert!(world.connected_faces(SEED).is_empty());
    assert!(world.connected_faces(ItemId(5)).is_empty());
}

#[test]
fn test_links_to_every_neighbor() {
    let mut world = world();
    let right = world.place(CUBE, &on(SEED, 0)).unwrap();
    let top = world.place(CUBE, &on(SEED, 4)).unwrap();

    let links: HashSet<FaceLink> = world.connected_faces(SEED).into_iter().collect();
    let expected: HashSet<FaceLink> = [
        FaceLink {
            face: 0,
            neighbor: right,
            neighbor_face: 1,
        },
        FaceLink {
            face: 2,
            neighbor: top,
            neighbor_face: 3,
        },
    ]
    .into_iter()
    .collect();
    assert_eq!(links, expected);
}

#[test]
fn test_links_are_symmetric() {
    let mut world = world();
    let top = world.place(CUBE, &on(SEED, 4)).unwrap();

    assert_eq!(
        world.connected_faces(top),
        vec![FaceLink {
            face: 3,
            neighbor: SEED,
            neighbor_face: 2
        }]
    );
    assert_eq!(
        world.connected_faces(SEED),
        vec![FaceLink {
            face: 2,
            neighbor: top,
            neighbor_face: 3
        }]
    );
}

#[test]
fn test_diagonal_neighbors_do_not_link() {
    let mut world = world();
    let right = world.place(CUBE, &on(SEED, 0)).unwrap();
    // On top of the right cube, diagonal to the seed
    let diagonal = world.place(CUBE, &on(right, 4)).unwrap();

    assert!(
        world
            .connected_faces(diagonal)
            .iter()
            .all(|link| link.neighbor == right)
    );
    assert!(
        world
            .connected_faces(SEED)
            .iter()
            .all(|link| link.neighbor == right)
    );
}

#[test]
fn test_wedge_bottom_links_to_cube_top() {
    let mut world = world();
    let wedge = world.place(WEDGE, &on(SEED, 4)).unwrap();

    assert_eq!(world.get(SEED).unwrap().face(2), Some(FaceMaterial::Hidden));
    assert_eq!(world.get(wedge).unwrap().face(1), Some(FaceMaterial::Hidden));
    assert_eq!(world.get(wedge).unwrap().hidden_slots(), vec![1]);
}

#[test]
fn test_wedge_slope_is_never_culled_by_a_flat_top() {
    let mut world = world();
    let wedge = world.place(WEDGE, &on(SEED, 4)).unwrap();
    assert_eq!(world.get(wedge).unwrap().face(0), Some(FaceMaterial::Shown(2)));
}

// ============================================================================
// Render Delta Tests
// ============================================================================

#[test]
fn test_placement_reports_face_updates() {
    let mut world = world();
    // Seed creation shows up in the first drain
    let initial = world.drain_changes();
    assert_eq!(initial.placed.len(), 1);
    assert!(world.drain_changes().is_empty());

    let top = world.place(CUBE, &on(SEED, 4)).unwrap();
    let changes = world.drain_changes();

    assert_eq!(changes.placed.len(), 1);
    assert_eq!(changes.placed[0].id, top);
    assert_eq!(changes.placed[0].faces[3], FaceMaterial::Hidden);
    assert_eq!(
        changes.face_updates,
        vec![
            FaceUpdate {
                item: top,
                slot: 3,
                material: FaceMaterial::Hidden
            },
            FaceUpdate {
                item: SEED,
                slot: 2,
                material: FaceMaterial::Hidden
            },
        ]
    );
}

#[test]
fn test_removal_reports_restored_faces() {
    let mut world = world();
    let top = world.place(CUBE, &on(SEED, 4)).unwrap();
    world.drain_changes();

    world.remove(top).unwrap();
    let changes = world.drain_changes();

    assert_eq!(changes.removed, vec![top]);
    assert!(changes.face_updates.contains(&FaceUpdate {
        item: SEED,
        slot: 2,
        material: FaceMaterial::Shown(1)
    }));
}
