//! # Physics
//!
//! Bounding boxes and the per-tick player movement step.
//!
//! * `aabb` - Axis-aligned boxes and the overlap test
//! * `player` - Player state, movement integration and collision resolution

pub mod aabb;
pub mod player;
