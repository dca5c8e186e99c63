//! # Block Side Module
//!
//! This module defines the different faces/sides of a voxel block.
//! Ray hits report the face they entered through, which decides where a
//! placed block goes.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// Each variant corresponds to a specific face and is assigned a unique integer value.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// The outward unit normal of this face.
    pub fn normal(&self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// The face hit by a ray entering a box across the given axis.
    ///
    /// # Arguments
    /// * `axis` - 0 for X, 1 for Y, 2 for Z
    /// * `direction_component` - The ray direction along that axis. A ray
    ///   travelling in the positive direction enters through the negative face.
    pub fn entered_through(axis: usize, direction_component: f32) -> BlockSide {
        let positive = direction_component > 0.0;
        match (axis, positive) {
            (0, true) => BlockSide::LEFT,
            (0, false) => BlockSide::RIGHT,
            (1, true) => BlockSide::BOTTOM,
            (1, false) => BlockSide::TOP,
            (_, true) => BlockSide::BACK,
            (_, false) => BlockSide::FRONT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normals_are_unit_and_distinct() {
        let normals: Vec<_> = [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
        .iter()
        .map(|side| side.normal())
        .collect();
        for (i, a) in normals.iter().enumerate() {
            assert_eq!(a.x.abs() + a.y.abs() + a.z.abs(), 1);
            for b in &normals[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn entry_face_opposes_travel_direction() {
        assert_eq!(BlockSide::entered_through(1, -1.0), BlockSide::TOP);
        assert_eq!(BlockSide::entered_through(0, 0.5).normal().x, -1);
        assert_eq!(BlockSide::entered_through(2, -0.3).normal().z, 1);
    }
}
