//! # Visible Set
//!
//! Tracks which blocks currently have a cube instance in the renderer. A block
//! is visible when its column is within `render_distance` of the player's
//! column on both X and Z. Recomputing is idempotent: a second call with no
//! world or player change produces an empty diff.

use std::collections::HashMap;

use cgmath::Point3;

use super::BlockRenderer;
use crate::engine_state::voxels::{block::block_type::BlockType, world::World};

/// Changes pushed to the renderer by one recompute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityDiff {
    pub added: Vec<Point3<i32>>,
    pub removed: Vec<Point3<i32>>,
}

impl VisibilityDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// The set of cube instances the renderer holds, keyed by coordinate.
#[derive(Debug, Default)]
pub struct VisibleSet {
    /// Rendered cells and the block type each instance was created with.
    instances: HashMap<Point3<i32>, BlockType>,
    render_distance: i32,
    low_performance: bool,
}

impl VisibleSet {
    /// Creates an empty set for the given radius.
    pub fn new(render_distance: i32, low_performance: bool) -> Self {
        VisibleSet {
            instances: HashMap::new(),
            render_distance,
            low_performance,
        }
    }

    /// Whether a cube instance exists for `cell`.
    pub fn contains(&self, cell: Point3<i32>) -> bool {
        self.instances.contains_key(&cell)
    }

    /// Number of cube instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Whether `cell` lies within the render radius of the player column.
    pub fn in_range(&self, cell: Point3<i32>, player_position: Point3<f32>) -> bool {
        let (center_x, center_z) = player_column(player_position);
        (cell.x - center_x).abs() <= self.render_distance
            && (cell.z - center_z).abs() <= self.render_distance
    }

    /// Brings the renderer in line with the world around `player_position`.
    ///
    /// Instances that left the radius, vanished from the world or changed type
    /// are removed; visible blocks without an instance are added. In
    /// low-performance mode every instance is torn down and rebuilt.
    pub fn recompute<R: BlockRenderer + ?Sized>(
        &mut self,
        world: &World,
        player_position: Point3<f32>,
        renderer: &mut R,
    ) -> VisibilityDiff {
        let mut diff = VisibilityDiff::default();

        if self.low_performance {
            for (cell, _) in self.instances.drain() {
                renderer.remove_cube(cell);
                diff.removed.push(cell);
            }
        }

        let stale: Vec<Point3<i32>> = self
            .instances
            .iter()
            .filter(|(cell, block_type)| {
                !self.in_range(**cell, player_position) || world.get(**cell) != Some(**block_type)
            })
            .map(|(cell, _)| *cell)
            .collect();
        for cell in stale {
            self.instances.remove(&cell);
            renderer.remove_cube(cell);
            diff.removed.push(cell);
        }

        for (cell, block_type) in world.iter() {
            if self.in_range(cell, player_position) && !self.instances.contains_key(&cell) {
                renderer.add_cube(cell, block_type);
                self.instances.insert(cell, block_type);
                diff.added.push(cell);
            }
        }

        if !diff.is_empty() {
            log::trace!(
                "Visibility: +{} -{} ({} rendered)",
                diff.added.len(),
                diff.removed.len(),
                self.instances.len()
            );
        }
        diff
    }

    /// Drops the instance at `cell` right away, e.g. after the block was broken.
    pub fn remove<R: BlockRenderer + ?Sized>(
        &mut self,
        cell: Point3<i32>,
        renderer: &mut R,
    ) -> bool {
        if self.instances.remove(&cell).is_some() {
            renderer.remove_cube(cell);
            true
        } else {
            false
        }
    }

    /// Adds an instance for a newly placed block if it is within range.
    pub fn insert<R: BlockRenderer + ?Sized>(
        &mut self,
        cell: Point3<i32>,
        block_type: BlockType,
        player_position: Point3<f32>,
        renderer: &mut R,
    ) -> bool {
        if !self.in_range(cell, player_position) {
            return false;
        }
        if let Some(previous) = self.instances.insert(cell, block_type) {
            if previous == block_type {
                return false;
            }
            renderer.remove_cube(cell);
        }
        renderer.add_cube(cell, block_type);
        true
    }
}

/// Column the player stands in.
fn player_column(player_position: Point3<f32>) -> (i32, i32) {
    (
        player_position.x.floor() as i32,
        player_position.z.floor() as i32,
    )
}
