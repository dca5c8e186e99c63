//! # Voxels
//!
//! Representation and creation of the block world.
//!
//! ## Architecture
//!
//! * **Block**: Block types, their faces and render colors
//! * **World**: A sparse map from integer cell to block type, with the
//!   bounding-box overlap query physics relies on
//! * **Generation**: The seeded three-pass world generator (terrain, caves, trees)
//!
//! ## Data Flow
//!
//! 1. The generator fills a fresh `World` once at startup
//! 2. Physics reads it every tick through overlap queries
//! 3. Break and place mutate it in response to player input
//! 4. The visible set mirrors it into the renderer

pub mod block;
pub mod generation;
pub mod world;
