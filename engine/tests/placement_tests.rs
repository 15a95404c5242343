//! Placement Tests - Attachment, Collision, Removal and Picking
//!
//! Drives a `BlockWorld` through the public API the way an input layer would:
//! pick a triangle, place against it, remove items again.

use std::f64::consts::FRAC_PI_2;

use glam::{DQuat, DVec2, DVec3, IVec3};
use voxel_builder_engine::config::{BlockCatalog, EngineConfig, MaterialKind};
use voxel_builder_engine::error::{PlacementError, RemovalError};
use voxel_builder_engine::geometry::{GeometryKind, Transform};
use voxel_builder_engine::world::{BlockWorld, FaceLink, FaceMaterial, ItemId, ItemState, TargetFace};

const CUBE: u32 = 201;
const WEDGE: u32 = 2;
const SPHERE: u32 = 3;

const SEED: ItemId = ItemId(1);
const CENTER: DVec2 = DVec2::new(0.5, 0.5);

fn catalog() -> BlockCatalog {
    BlockCatalog::builder()
        .material(11, MaterialKind::Basic)
        .material(12, MaterialKind::Basic)
        .material(2, MaterialKind::Phong)
        .material(3, MaterialKind::Phong)
        .block_type(CUBE, GeometryKind::Cube, [11, 11, 12, 11, 11, 11])
        .block_type(WEDGE, GeometryKind::Wedge, [2])
        .block_type(SPHERE, GeometryKind::Sphere, [3])
        .build()
        .unwrap()
}

fn config() -> EngineConfig {
    EngineConfig {
        autosave: false,
        rng_seed: Some(7),
        ..EngineConfig::default()
    }
}

fn cube_world() -> BlockWorld {
    BlockWorld::new(config(), catalog()).unwrap()
}

fn target(item: ItemId, triangle: usize) -> TargetFace {
    TargetFace {
        item,
        triangle,
        uv: CENTER,
    }
}

// ============================================================================
// Seed World Tests
// ============================================================================

#[test]
fn test_new_world_has_seed_cube() {
    let world = cube_world();

    assert_eq!(world.len(), 1);
    let seed = world.get(SEED).unwrap();
    assert_eq!(seed.block_type(), CUBE);
    assert_eq!(seed.position(), DVec3::ZERO);
    assert_eq!(seed.faces()[2], FaceMaterial::Shown(12));
    assert_eq!(world.index().cell_of(SEED), Some(IVec3::ZERO));
}

#[test]
fn test_unknown_default_block_type_rejected() {
    let config = EngineConfig {
        default_block_type: 999,
        ..config()
    };
    assert!(BlockWorld::new(config, catalog()).is_err());
}

// ============================================================================
// Placement Tests
// ============================================================================

#[test]
fn test_place_cube_on_top() {
    let mut world = cube_world();

    // Triangle 4 is the first half of the top face
    let placed = world.place(CUBE, &target(SEED, 4)).unwrap();
    let item = world.get(placed).unwrap();

    assert!(item.position().abs_diff_eq(DVec3::new(0.0, 1.0, 0.0), 1e-9));
    // Center of the face falls in the quarter-turn quadrant
    assert!(
        item.transform()
            .rotation
            .abs_diff_eq(DQuat::from_rotation_y(FRAC_PI_2), 1e-9)
    );
    assert_eq!(world.index().cell_of(placed), Some(IVec3::new(0, 1, 0)));

    // Both touching faces are culled
    assert_eq!(item.face(3), Some(FaceMaterial::Hidden));
    assert_eq!(world.get(SEED).unwrap().face(2), Some(FaceMaterial::Hidden));
    assert_eq!(world.get(SEED).unwrap().hidden_slots(), vec![2]);
}

#[test]
fn test_place_on_each_cube_face() {
    let expected = [
        DVec3::X,
        DVec3::NEG_X,
        DVec3::Y,
        DVec3::NEG_Y,
        DVec3::Z,
        DVec3::NEG_Z,
    ];
    for (face, offset) in expected.iter().enumerate() {
        let mut world = cube_world();
        let placed = world.place(CUBE, &target(SEED, face * 2 + 1)).unwrap();
        let position = world.get(placed).unwrap().position();
        assert!(
            position.abs_diff_eq(*offset, 1e-9),
            "face {face}: expected {offset:?}, got {position:?}"
        );
    }
}

#[test]
fn test_wedge_on_every_cube_face() {
    let normals = [
        DVec3::X,
        DVec3::NEG_X,
        DVec3::Y,
        DVec3::NEG_Y,
        DVec3::Z,
        DVec3::NEG_Z,
    ];
    let uvs = [
        CENTER,
        DVec2::new(0.9, 0.5),
        DVec2::new(0.1, 0.9),
        DVec2::new(0.2, 0.1),
    ];
    for (face, normal) in normals.iter().enumerate() {
        for uv in uvs {
            let mut world = cube_world();
            let target = TargetFace {
                item: SEED,
                triangle: face * 2,
                uv,
            };
            let placed = world.place(WEDGE, &target).unwrap();
            let wedge = world.get(placed).unwrap();

            assert!(
                wedge.position().abs_diff_eq(*normal, 1e-9),
                "face {face} uv {uv}: wedge at {:?}",
                wedge.position()
            );
            // The wedge's base faces back toward the cube
            let down = wedge.transform().transform_vector(DVec3::NEG_Y);
            assert!(
                down.abs_diff_eq(-*normal, 1e-9),
                "face {face} uv {uv}: base points {down:?}"
            );
            assert_eq!(wedge.hidden_slots(), vec![1], "face {face} uv {uv}");
            assert_eq!(world.get(SEED).unwrap().hidden_slots(), vec![face]);
        }
    }
}

#[test]
fn test_occupied_spot_is_refused() {
    let mut world = cube_world();
    let first = world.place(CUBE, &target(SEED, 4)).unwrap();

    let result = world.place(CUBE, &target(SEED, 5));
    assert_eq!(result, Err(PlacementError::CollisionDetected { with: first }));
    assert_eq!(world.len(), 2);
}

#[test]
fn test_would_collide_query() {
    let world = cube_world();

    assert!(world.would_collide(CUBE, Transform::IDENTITY).unwrap());
    assert!(
        world
            .would_collide(CUBE, Transform::from_translation(DVec3::new(0.4, 0.0, 0.0)))
            .unwrap()
    );
    assert!(
        !world
            .would_collide(CUBE, Transform::from_translation(DVec3::new(0.0, 1.0, 0.0)))
            .unwrap()
    );
    assert!(
        !world
            .would_collide(CUBE, Transform::from_translation(DVec3::new(5.0, 0.0, 0.0)))
            .unwrap()
    );
    assert_eq!(
        world.would_collide(42, Transform::IDENTITY),
        Err(PlacementError::UnknownBlockType(42))
    );
}

#[test]
fn test_unknown_type_and_item_rejected() {
    let mut world = cube_world();

    assert_eq!(
        world.place(42, &target(SEED, 4)),
        Err(PlacementError::UnknownBlockType(42))
    );
    assert_eq!(
        world.place(CUBE, &target(ItemId(77), 4)),
        Err(PlacementError::UnknownItem(ItemId(77)))
    );
    assert_eq!(
        world.place(CUBE, &target(SEED, 12)),
        Err(PlacementError::AttachmentRefused {
            item: SEED,
            triangle: 12
        })
    );
}

#[test]
fn test_wedge_side_and_back_refuse_attachment() {
    let config = EngineConfig {
        default_block_type: WEDGE,
        ..config()
    };
    let mut world = BlockWorld::new(config, catalog()).unwrap();

    for triangle in [0, 1, 4, 5] {
        assert_eq!(
            world.place(CUBE, &target(SEED, triangle)),
            Err(PlacementError::AttachmentRefused {
                item: SEED,
                triangle
            })
        );
    }
    assert_eq!(world.len(), 1);
}

#[test]
fn test_cube_on_wedge_slope() {
    let config = EngineConfig {
        default_block_type: WEDGE,
        ..config()
    };
    let mut world = BlockWorld::new(config, catalog()).unwrap();

    let placed = world.place(CUBE, &target(SEED, 2)).unwrap();
    let item = world.get(placed).unwrap();

    let expected = DVec3::new(0.0, std::f64::consts::SQRT_2 / 2.0 - 0.5, 0.5);
    assert!(item.position().abs_diff_eq(expected, 1e-9));
    assert_eq!(world.index().cell_of(placed), Some(IVec3::new(0, 0, 1)));

    // Cube bottom rests on the slope and both are culled
    assert_eq!(
        world.connected_faces(placed),
        vec![FaceLink {
            face: 3,
            neighbor: SEED,
            neighbor_face: 0
        }]
    );
    assert_eq!(world.get(SEED).unwrap().face(0), Some(FaceMaterial::Hidden));
}

#[test]
fn test_cube_on_sphere_snaps_to_axis() {
    let mut world = cube_world();
    let sphere = world.place(SPHERE, &target(SEED, 4)).unwrap();

    let hit = world
        .pick(DVec3::new(0.05, 5.0, 0.03), DVec3::NEG_Y, 100.0)
        .unwrap();
    assert_eq!(hit.target.item, sphere);

    let placed = world.place(CUBE, &hit.target).unwrap();
    let position = world.get(placed).unwrap().position();
    assert!(position.abs_diff_eq(DVec3::new(0.0, 2.0, 0.0), 1e-9));
}

// ============================================================================
// Removal Tests
// ============================================================================

#[test]
fn test_last_item_cannot_be_removed() {
    let mut world = cube_world();
    assert_eq!(world.remove(SEED).unwrap_err(), RemovalError::LastItem);
    assert_eq!(
        world.remove(ItemId(9)).unwrap_err(),
        RemovalError::UnknownItem(ItemId(9))
    );
    assert_eq!(world.len(), 1);
}

#[test]
fn test_remove_restores_neighbor_faces() {
    let mut world = cube_world();
    let placed = world.place(CUBE, &target(SEED, 4)).unwrap();

    let removed = world.remove(placed).unwrap();
    assert_eq!(removed.id(), placed);
    assert_eq!(removed.state(), ItemState::Removed);

    assert!(world.get(placed).is_none());
    assert!(!world.index().contains(placed));
    assert_eq!(world.get(SEED).unwrap().face(2), Some(FaceMaterial::Shown(12)));
    assert!(world.get(SEED).unwrap().hidden_slots().is_empty());
}

#[test]
fn test_remove_then_replace_restores_hidden_set() {
    let mut world = cube_world();
    let right = world.place(CUBE, &target(SEED, 0)).unwrap();
    let top = world.place(CUBE, &target(SEED, 4)).unwrap();
    let before = world.get(SEED).unwrap().hidden_slots();
    assert_eq!(before, vec![0, 2]);

    world.remove(top).unwrap();
    assert_eq!(world.get(SEED).unwrap().hidden_slots(), vec![0]);
    assert_eq!(world.get(right).unwrap().hidden_slots(), vec![1]);

    world.place(CUBE, &target(SEED, 4)).unwrap();
    assert_eq!(world.get(SEED).unwrap().hidden_slots(), before);
}

#[test]
fn test_ids_are_never_reused() {
    let mut world = cube_world();
    let first = world.place(CUBE, &target(SEED, 4)).unwrap();
    world.remove(first).unwrap();
    let second = world.place(CUBE, &target(SEED, 4)).unwrap();
    assert_ne!(first, second);
}

// ============================================================================
// Picking and Containment Tests
// ============================================================================

#[test]
fn test_pick_top_face_uv() {
    let world = cube_world();
    let hit = world
        .pick(DVec3::new(0.2, 5.0, 0.1), DVec3::NEG_Y, 100.0)
        .unwrap();

    assert_eq!(hit.target.item, SEED);
    assert_eq!(hit.target.triangle, 4);
    let h = 0.9998 / 2.0;
    let expected = DVec2::new((0.2 + h) / (2.0 * h), (h - 0.1) / (2.0 * h));
    assert!(hit.target.uv.abs_diff_eq(expected, 1e-9));
    assert!((hit.distance - (5.0 - h)).abs() < 1e-9);
}

#[test]
fn test_pick_returns_nearest_item() {
    let mut world = cube_world();
    let top = world.place(CUBE, &target(SEED, 4)).unwrap();

    let hit = world
        .pick(DVec3::new(0.2, 5.0, 0.1), DVec3::NEG_Y, 100.0)
        .unwrap();
    assert_eq!(hit.target.item, top);

    assert!(world.pick(DVec3::new(0.2, 5.0, 0.1), DVec3::Y, 100.0).is_none());
    assert!(world.pick(DVec3::new(0.2, 5.0, 0.1), DVec3::NEG_Y, 1.0).is_none());
}

#[test]
fn test_point_in_item() {
    let mut world = cube_world();
    let top = world.place(CUBE, &target(SEED, 4)).unwrap();

    assert!(world.point_in_item(DVec3::new(0.1, 0.2, -0.3), SEED));
    assert!(!world.point_in_item(DVec3::new(0.1, 0.2, -0.3), top));
    assert!(world.point_in_item(DVec3::new(0.0, 1.3, 0.0), top));
    assert!(!world.point_in_item(DVec3::ZERO, ItemId(99)));
}
