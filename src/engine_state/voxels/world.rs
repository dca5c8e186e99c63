//! # World Module
//!
//! This module provides the `World` struct, the sparse mapping from integer
//! block coordinates to block types that the generator fills and the player
//! edits.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach where only occupied cells are kept
//! in memory. A missing key means air. Each block occupies the unit cube
//! `[x,x+1) x [y,y+1) x [z,z+1)`.
//!
//! ## Performance Considerations
//!
//! - Block lookup is O(1) using a hash map keyed by coordinate
//! - Overlap queries only visit the cells under the query box, which gives the
//!   same answer as testing every occupied cell

use std::collections::HashMap;

use cgmath::Point3;

use super::block::block_type::BlockType;
use crate::engine_state::physics::aabb::Aabb;

/// Represents the voxel world as a sparse grid of blocks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_sandbox::{BlockType, World};
///
/// let mut world = World::new();
/// world.set(Point3::new(5, 3, 5), BlockType::STONE);
/// assert_eq!(world.get(Point3::new(5, 3, 5)), Some(BlockType::STONE));
/// assert_eq!(world.get(Point3::new(5, 4, 5)), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct World {
    /// A mapping from block coordinates to block types.
    blocks: HashMap<Point3<i32>, BlockType>,
}

impl World {
    /// Creates a new, empty world.
    pub fn new() -> Self {
        World {
            blocks: HashMap::new(),
        }
    }

    /// Returns the block at `position`, or `None` for air.
    pub fn get(&self, position: Point3<i32>) -> Option<BlockType> {
        self.blocks.get(&position).copied()
    }

    /// Whether a block occupies `position`.
    pub fn contains(&self, position: Point3<i32>) -> bool {
        self.blocks.contains_key(&position)
    }

    /// Places `block_type` at `position`, replacing any existing block.
    ///
    /// # Returns
    /// The block that was previously there, if any.
    pub fn set(&mut self, position: Point3<i32>, block_type: BlockType) -> Option<BlockType> {
        self.blocks.insert(position, block_type)
    }

    /// Removes the block at `position`. Removing air is a no-op.
    ///
    /// # Returns
    /// The removed block, if there was one.
    pub fn remove(&mut self, position: Point3<i32>) -> Option<BlockType> {
        self.blocks.remove(&position)
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the world has no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates every occupied cell and its block type, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Point3<i32>, BlockType)> + '_ {
        self.blocks.iter().map(|(position, block)| (*position, *block))
    }

    /// Highest occupied `y` in the column at (`x`, `z`).
    ///
    /// Scans every key sharing the column.
    ///
    /// # Returns
    /// `None` if the column holds no blocks.
    pub fn column_top(&self, x: i32, z: i32) -> Option<i32> {
        self.blocks
            .keys()
            .filter(|position| position.x == x && position.z == z)
            .map(|position| position.y)
            .max()
    }

    /// Iterates the blocks whose unit cubes overlap `query`.
    pub fn overlapping_blocks<'a>(
        &'a self,
        query: &'a Aabb,
    ) -> impl Iterator<Item = (Point3<i32>, BlockType)> + 'a {
        let (lo, hi) = query.cell_range();
        (lo.x..=hi.x).flat_map(move |x| {
            (lo.y..=hi.y).flat_map(move |y| {
                (lo.z..=hi.z).filter_map(move |z| {
                    let position = Point3::new(x, y, z);
                    let block = self.get(position)?;
                    Aabb::unit_cube(position)
                        .overlaps(query)
                        .then_some((position, block))
                })
            })
        })
    }

    /// Whether any occupied cell's unit cube overlaps `query`.
    pub fn overlaps_any_block(&self, query: &Aabb) -> bool {
        self.overlapping_blocks(query).next().is_some()
    }
}

impl FromIterator<(Point3<i32>, BlockType)> for World {
    fn from_iter<T: IntoIterator<Item = (Point3<i32>, BlockType)>>(iter: T) -> Self {
        World {
            blocks: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_overlap(world: &World, query: &Aabb) -> bool {
        world
            .iter()
            .any(|(position, _)| Aabb::unit_cube(position).overlaps(query))
    }

    #[test]
    fn set_get_remove() {
        let mut world = World::new();
        let cell = Point3::new(5, 3, 5);
        assert_eq!(world.set(cell, BlockType::DIRT), None);
        assert_eq!(world.set(cell, BlockType::COAL), Some(BlockType::DIRT));
        assert_eq!(world.get(cell), Some(BlockType::COAL));
        assert_eq!(world.remove(cell), Some(BlockType::COAL));
        assert_eq!(world.remove(cell), None);
        assert!(world.is_empty());
    }

    #[test]
    fn column_top_handles_gaps_and_empty_columns() {
        let mut world = World::new();
        world.set(Point3::new(2, 0, 2), BlockType::STONE);
        world.set(Point3::new(2, 7, 2), BlockType::GRASS);
        world.set(Point3::new(3, 9, 2), BlockType::GRASS);
        assert_eq!(world.column_top(2, 2), Some(7));
        assert_eq!(world.column_top(4, 4), None);
    }

    #[test]
    fn probing_overlap_matches_linear_scan() {
        let world: World = (0..6)
            .flat_map(|x| (0..3).map(move |y| Point3::new(x, y, (x + y) % 4)))
            .map(|position| (position, BlockType::STONE))
            .collect();

        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..500 {
            let foot = Point3::new(
                rng.f32() * 8.0 - 1.0,
                rng.f32() * 5.0 - 1.0,
                rng.f32() * 6.0 - 1.0,
            );
            let query = Aabb::from_foot(foot, 0.6, 1.8);
            assert_eq!(
                world.overlaps_any_block(&query),
                linear_overlap(&world, &query),
                "{query:?}"
            );
        }
    }

    #[test]
    fn aligned_player_box_does_not_overlap_floor() {
        let mut world = World::new();
        world.set(Point3::new(0, 0, 0), BlockType::GRASS);
        let standing = Aabb::from_foot(Point3::new(0.5, 1.0, 0.5), 0.6, 1.8);
        assert!(!world.overlaps_any_block(&standing));
        let sunk = Aabb::from_foot(Point3::new(0.5, 0.9, 0.5), 0.6, 1.8);
        assert!(world.overlaps_any_block(&sunk));
    }
}
