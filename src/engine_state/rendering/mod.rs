//! Rendering seam for the sandbox.
//!
//! The simulation never draws anything itself. It keeps a [`VisibleSet`] of
//! the cubes that should exist and pushes add/remove calls through the
//! [`BlockRenderer`] trait, which a host implements on top of its graphics
//! backend. [`CubeInstanceRecorder`] is the in-memory implementation used by
//! the headless binary and the tests.

use std::collections::HashMap;

use cgmath::Point3;

use super::voxels::block::block_type::BlockType;

pub mod visibility;

pub use visibility::{VisibilityDiff, VisibleSet};

/// A backend able to show one colored unit cube per coordinate.
pub trait BlockRenderer {
    /// Creates or replaces the cube instance at `position`.
    fn add_cube(&mut self, position: Point3<i32>, block_type: BlockType);

    /// Destroys the cube instance at `position`, if any.
    fn remove_cube(&mut self, position: Point3<i32>);
}

/// A single cube instance as a GPU backend would receive it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeInstance {
    pub block_type: BlockType,
    /// RGBA, alpha below 1 for blended blocks
    pub color: [f32; 4],
    /// Drawn in the alpha-blended pass
    pub blended: bool,
}

/// Renderer that only records its cube instances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CubeInstanceRecorder {
    instances: HashMap<Point3<i32>, CubeInstance>,
    adds: usize,
    removes: usize,
}

impl CubeInstanceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The instance at `position`, if one exists.
    pub fn get(&self, position: Point3<i32>) -> Option<&CubeInstance> {
        self.instances.get(&position)
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Total `add_cube` and `remove_cube` calls received.
    pub fn call_counts(&self) -> (usize, usize) {
        (self.adds, self.removes)
    }

    /// Number of live instances using alpha blending.
    pub fn transparent_count(&self) -> usize {
        self.instances
            .values()
            .filter(|instance| instance.blended)
            .count()
    }
}

impl BlockRenderer for CubeInstanceRecorder {
    fn add_cube(&mut self, position: Point3<i32>, block_type: BlockType) {
        self.adds += 1;
        self.instances.insert(
            position,
            CubeInstance {
                block_type,
                color: block_type.color(),
                blended: block_type.is_transparent(),
            },
        );
    }

    fn remove_cube(&mut self, position: Point3<i32>) {
        self.removes += 1;
        self.instances.remove(&position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_tracks_instances_and_colors() {
        let mut recorder = CubeInstanceRecorder::new();
        recorder.add_cube(Point3::new(0, 0, 0), BlockType::GRASS);
        recorder.add_cube(Point3::new(0, 1, 0), BlockType::WATER);

        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.transparent_count(), 1);
        assert!(recorder.get(Point3::new(0, 1, 0)).is_some_and(|i| i.blended));
        assert_eq!(
            recorder.get(Point3::new(0, 0, 0)).map(|i| i.color),
            Some([0.13, 0.55, 0.13, 1.0])
        );

        recorder.remove_cube(Point3::new(0, 1, 0));
        recorder.remove_cube(Point3::new(9, 9, 9));
        assert_eq!(recorder.len(), 1);
        assert_eq!(recorder.call_counts(), (2, 2));
    }
}
