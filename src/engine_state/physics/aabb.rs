//! # Axis-Aligned Bounding Boxes
//!
//! Boxes for the player hitbox and for block unit cubes, plus the strict
//! interval overlap test both movement and placement rely on.

use cgmath::{Point3, Vector3};

/// Axis-aligned bounding box with `min <= max` componentwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Point3<f32>,
    /// Maximum corner
    pub max: Point3<f32>,
}

impl Aabb {
    /// Creates a box from its two corners.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y && min.z <= max.z);
        Aabb { min, max }
    }

    /// The unit cube `[x,x+1) x [y,y+1) x [z,z+1)` occupied by the block at `cell`.
    pub fn unit_cube(cell: Point3<i32>) -> Self {
        let min = Point3::new(cell.x as f32, cell.y as f32, cell.z as f32);
        Aabb {
            min,
            max: min + Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// A player-style box: `width` wide on X and Z, centered on `foot`
    /// horizontally, spanning `foot.y..foot.y + height` vertically.
    pub fn from_foot(foot: Point3<f32>, width: f32, height: f32) -> Self {
        let half = width / 2.0;
        Aabb {
            min: Point3::new(foot.x - half, foot.y, foot.z - half),
            max: Point3::new(foot.x + half, foot.y + height, foot.z + half),
        }
    }

    /// Strict 3D interval overlap. Boxes that only touch along a face do not
    /// overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Integer cells whose unit cubes could overlap this box.
    ///
    /// The range is inclusive on both ends and may contain cells that only touch
    /// the box; callers still run [`Aabb::overlaps`] on each.
    pub fn cell_range(&self) -> (Point3<i32>, Point3<i32>) {
        (
            Point3::new(
                self.min.x.floor() as i32,
                self.min.y.floor() as i32,
                self.min.z.floor() as i32,
            ),
            Point3::new(
                self.max.x.floor() as i32,
                self.max.y.floor() as i32,
                self.max.z.floor() as i32,
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes() -> Vec<Aabb> {
        vec![
            Aabb::unit_cube(Point3::new(0, 0, 0)),
            Aabb::unit_cube(Point3::new(1, 0, 0)),
            Aabb::unit_cube(Point3::new(0, 1, 0)),
            Aabb::from_foot(Point3::new(0.5, 0.2, 0.5), 0.6, 1.8),
            Aabb::from_foot(Point3::new(1.2, 1.0, 0.5), 0.6, 1.8),
            Aabb::new(Point3::new(-3.0, -3.0, -3.0), Point3::new(3.0, 3.0, 3.0)),
            Aabb::new(Point3::new(0.9, 0.9, 0.9), Point3::new(0.95, 0.95, 0.95)),
        ]
    }

    #[test]
    fn overlap_is_symmetric() {
        let boxes = boxes();
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn touching_faces_do_not_overlap() {
        let a = Aabb::unit_cube(Point3::new(0, 0, 0));
        let b = Aabb::unit_cube(Point3::new(1, 0, 0));
        assert!(!a.overlaps(&b));

        let standing = Aabb::from_foot(Point3::new(0.5, 1.0, 0.5), 0.6, 1.8);
        assert!(!standing.overlaps(&a));
    }

    #[test]
    fn contained_box_overlaps() {
        let outer = Aabb::unit_cube(Point3::new(0, 0, 0));
        let inner = Aabb::new(Point3::new(0.2, 0.2, 0.2), Point3::new(0.4, 0.4, 0.4));
        assert!(outer.overlaps(&inner));
    }

    #[test]
    fn cell_range_covers_player_box() {
        let player = Aabb::from_foot(Point3::new(4.5, 2.0, -0.5), 0.6, 1.8);
        let (lo, hi) = player.cell_range();
        assert_eq!(lo, Point3::new(4, 2, -1));
        assert_eq!(hi, Point3::new(4, 3, -1));
    }
}
