//! # Block Module
//!
//! This module provides the core block-related functionality for the sandbox.
//! It includes block type definitions, block face handling, and the color
//! table the renderer uses for each block type.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types compactly.
pub type BlockTypeSize = u8;

/// Maps each block type to its RGBA render color.
///
/// The array is indexed by `BlockType` as a `usize`. Only WATER has an alpha
/// below 1.0 and must be drawn with alpha blending.
pub static BLOCK_TYPE_TO_COLOR: [[f32; 4]; 5] = [
    [0.13, 0.55, 0.13, 1.0], // GRASS
    [0.55, 0.27, 0.07, 1.0], // DIRT
    [0.75, 0.75, 0.75, 1.0], // STONE
    [0.2, 0.2, 0.2, 1.0],    // COAL
    [0.12, 0.56, 1.0, 0.7],  // WATER
];

impl BlockType {
    /// Gets the RGBA render color for this block type.
    pub fn color(&self) -> [f32; 4] {
        BLOCK_TYPE_TO_COLOR[*self as usize]
    }
}
