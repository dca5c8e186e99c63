//! # Block Type Module
//!
//! This module defines the different types of blocks in the sandbox world.
//! It provides functionality for block type identification, hotbar lookup and
//! the solidity rules used by placement and movement.

use std::fmt;

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::BlockTypeSize;

/// Number of slots in the hotbar. The first `HOTBAR_SIZE` block types (by
/// discriminant) are the placeable ones.
pub const HOTBAR_SIZE: usize = 4;

/// Enumerates all possible block types in the sandbox world.
///
/// Absence of a block in the [`World`](crate::engine_state::voxels::world::World)
/// means air, so there is no `AIR` variant. The discriminant order doubles as
/// the hotbar order: GRASS, DIRT, STONE, COAL occupy slots 0..4.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Topsoil. Also used for tree foliage.
    GRASS = 0,

    /// The layer directly under grass. Also used for tree trunks.
    DIRT = 1,

    /// Bulk terrain below the dirt layer.
    STONE = 2,

    /// Randomly replaces stone.
    COAL = 3,

    /// Shallow pool marker placed above low plains terrain. Rendered translucent.
    WATER = 4,
}

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// # Returns
    /// `None` if the value doesn't correspond to a valid `BlockType`.
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// Returns the block type held in the given hotbar slot, if the slot exists.
    pub fn from_hotbar_slot(slot: usize) -> Option<Self> {
        if slot >= HOTBAR_SIZE {
            return None;
        }
        Self::get_block_type_from_int(slot as BlockTypeSize)
    }

    /// Whether the block is a fluid. Fluids only block movement when the
    /// player config says so.
    pub fn is_fluid(&self) -> bool {
        matches!(self, BlockType::WATER)
    }

    /// Whether the renderer must alpha-blend this block.
    pub fn is_transparent(&self) -> bool {
        matches!(self, BlockType::WATER)
    }

    /// Lowercase name, as used by config files and logs.
    pub fn name(&self) -> &'static str {
        match self {
            BlockType::GRASS => "grass",
            BlockType::DIRT => "dirt",
            BlockType::STONE => "stone",
            BlockType::COAL => "coal",
            BlockType::WATER => "water",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
