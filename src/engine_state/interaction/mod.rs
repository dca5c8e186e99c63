//! # Block Interaction
//!
//! Break and place, driven by the nearest hit of the view ray.
//!
//! * **Break** removes the block the ray hit.
//! * **Place** inserts the selected block into the empty cell in front of the
//!   hit face, unless that cell would intersect the player.
//!
//! Neither action ever fails; every rejected attempt is reported as an
//! [`InteractionOutcome`] variant and leaves the world untouched.

use cgmath::Point3;

use crate::engine_state::{
    physics::aabb::Aabb,
    voxels::{block::block_type::BlockType, world::World},
};

pub mod raycast;

use raycast::RayHit;

/// Result of a break or place attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// A block was removed.
    Broken {
        cell: Point3<i32>,
        block_type: BlockType,
    },
    /// A block was inserted.
    Placed {
        cell: Point3<i32>,
        block_type: BlockType,
    },
    /// The view ray hit nothing within reach.
    NoHit,
    /// The hit resolved to a cell holding no block.
    NothingToBreak,
    /// The target cell would intersect the player.
    ObstructedByPlayer,
    /// The target cell already holds a solid block.
    Occupied,
    /// The selected hotbar slot holds no block type.
    EmptySlot,
}

impl InteractionOutcome {
    /// Whether the world was changed.
    pub fn changed_world(&self) -> bool {
        matches!(
            self,
            InteractionOutcome::Broken { .. } | InteractionOutcome::Placed { .. }
        )
    }
}

/// Removes the block under `hit`.
pub fn break_block(world: &mut World, hit: Option<RayHit>) -> InteractionOutcome {
    let Some(hit) = hit else {
        return InteractionOutcome::NoHit;
    };
    let cell = hit.target_cell();
    match world.remove(cell) {
        Some(block_type) => {
            log::debug!("Broke {block_type} at {cell:?}");
            InteractionOutcome::Broken { cell, block_type }
        }
        None => InteractionOutcome::NothingToBreak,
    }
}

/// Inserts `block_type` in front of the face under `hit`, unless the cell
/// overlaps `player_box`.
pub fn place_block(
    world: &mut World,
    hit: Option<RayHit>,
    block_type: BlockType,
    player_box: &Aabb,
) -> InteractionOutcome {
    let Some(hit) = hit else {
        return InteractionOutcome::NoHit;
    };
    let cell = hit.adjacent_cell();
    place_at(world, cell, block_type, player_box)
}

/// Inserts `block_type` at `cell` unless it overlaps `player_box` or holds a
/// solid block. Fluids are replaced.
pub fn place_at(
    world: &mut World,
    cell: Point3<i32>,
    block_type: BlockType,
    player_box: &Aabb,
) -> InteractionOutcome {
    if Aabb::unit_cube(cell).overlaps(player_box) {
        log::debug!("Refusing to place {block_type} at {cell:?}: overlaps player");
        return InteractionOutcome::ObstructedByPlayer;
    }
    if world.get(cell).is_some_and(|existing| !existing.is_fluid()) {
        return InteractionOutcome::Occupied;
    }
    world.set(cell, block_type);
    log::debug!("Placed {block_type} at {cell:?}");
    InteractionOutcome::Placed { cell, block_type }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::raycast::{BlockRaycaster, RayQuery};
    use super::*;

    fn player_box() -> Aabb {
        Aabb::from_foot(cgmath::Point3::new(5.5, 1.0, 5.5), 0.6, 1.8)
    }

    #[test]
    fn break_removes_hit_block() {
        let mut world = World::new();
        world.set(Point3::new(5, 3, 5), BlockType::STONE);
        let hit = BlockRaycaster::new(&world).cast(
            cgmath::Point3::new(5.5, 6.0, 5.5),
            Vector3::new(0.0, -1.0, 0.0),
            8.0,
        );

        let outcome = break_block(&mut world, hit);
        assert_eq!(
            outcome,
            InteractionOutcome::Broken {
                cell: Point3::new(5, 3, 5),
                block_type: BlockType::STONE
            }
        );
        assert!(world.get(Point3::new(5, 3, 5)).is_none());
        assert!(world.is_empty());
    }

    #[test]
    fn break_without_hit_is_noop() {
        let mut world = World::new();
        world.set(Point3::new(0, 0, 0), BlockType::STONE);
        assert_eq!(break_block(&mut world, None), InteractionOutcome::NoHit);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn place_inside_player_is_noop() {
        let mut world = World::new();
        world.set(Point3::new(5, 0, 5), BlockType::STONE);
        let before = world.clone();

        let outcome = place_at(&mut world, Point3::new(5, 1, 5), BlockType::DIRT, &player_box());
        assert_eq!(outcome, InteractionOutcome::ObstructedByPlayer);
        assert_eq!(world, before);
    }

    #[test]
    fn place_next_to_player_succeeds() {
        let mut world = World::new();
        let outcome = place_at(&mut world, Point3::new(6, 1, 5), BlockType::COAL, &player_box());
        assert!(outcome.changed_world());
        assert_eq!(world.get(Point3::new(6, 1, 5)), Some(BlockType::COAL));
    }

    #[test]
    fn place_on_hit_face() {
        let mut world = World::new();
        world.set(Point3::new(2, 0, 2), BlockType::GRASS);
        let hit = BlockRaycaster::new(&world).cast(
            cgmath::Point3::new(2.5, 4.0, 2.5),
            Vector3::new(0.0, -1.0, 0.0),
            8.0,
        );

        let outcome = place_block(&mut world, hit, BlockType::STONE, &player_box());
        assert_eq!(
            outcome,
            InteractionOutcome::Placed {
                cell: Point3::new(2, 1, 2),
                block_type: BlockType::STONE
            }
        );
    }

    #[test]
    fn place_on_occupied_cell_is_noop() {
        let mut world = World::new();
        world.set(Point3::new(9, 1, 9), BlockType::GRASS);
        let outcome = place_at(&mut world, Point3::new(9, 1, 9), BlockType::STONE, &player_box());
        assert_eq!(outcome, InteractionOutcome::Occupied);
        assert_eq!(world.get(Point3::new(9, 1, 9)), Some(BlockType::GRASS));
    }

    #[test]
    fn place_replaces_water() {
        let mut world = World::new();
        world.set(Point3::new(9, 1, 9), BlockType::WATER);
        let outcome = place_at(&mut world, Point3::new(9, 1, 9), BlockType::DIRT, &player_box());
        assert!(outcome.changed_world());
        assert_eq!(world.get(Point3::new(9, 1, 9)), Some(BlockType::DIRT));
    }
}
