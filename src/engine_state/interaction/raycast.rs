//! # Ray Queries
//!
//! The view ray used by break and place. [`RayQuery`] is the seam a host can
//! fill with its own collision system; [`BlockRaycaster`] answers it directly
//! from the [`World`] with a slab test against every block's unit cube.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::{
    physics::aabb::Aabb,
    voxels::{block::block_side::BlockSide, world::World},
};

/// Nearest surface hit along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Point on the block surface where the ray entered.
    pub point: Point3<f32>,
    /// Face the ray entered through.
    pub side: BlockSide,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
}

impl RayHit {
    /// Outward surface normal at the hit point.
    pub fn normal(&self) -> Vector3<f32> {
        let normal = self.side.normal();
        Vector3::new(normal.x as f32, normal.y as f32, normal.z as f32)
    }

    /// The cell that was hit: the hit point pushed half a block into the surface, floored.
    pub fn target_cell(&self) -> Point3<i32> {
        floor_cell(self.point - self.normal() * 0.5)
    }

    /// The empty cell in front of the hit face: the hit point pushed half a
    /// block out along the normal, floored.
    pub fn adjacent_cell(&self) -> Point3<i32> {
        floor_cell(self.point + self.normal() * 0.5)
    }
}

fn floor_cell(point: Point3<f32>) -> Point3<i32> {
    Point3::new(
        point.x.floor() as i32,
        point.y.floor() as i32,
        point.z.floor() as i32,
    )
}

/// Provider of nearest-hit ray queries against the block geometry.
pub trait RayQuery {
    /// Casts a ray from `origin` along `direction` (need not be normalized).
    ///
    /// # Returns
    /// The nearest hit within `max_distance`, or `None`.
    fn cast(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<RayHit>;
}

/// Ray queries answered straight from the world's blocks.
pub struct BlockRaycaster<'a> {
    world: &'a World,
}

impl<'a> BlockRaycaster<'a> {
    pub fn new(world: &'a World) -> Self {
        BlockRaycaster { world }
    }
}

impl RayQuery for BlockRaycaster<'_> {
    fn cast(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<RayHit> {
        if direction.magnitude2() == 0.0 {
            return None;
        }
        let direction = direction.normalize();

        self.world
            .iter()
            .filter_map(|(cell, _)| ray_box_entry(origin, direction, &Aabb::unit_cube(cell)))
            .filter(|(distance, _)| *distance <= max_distance)
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(distance, side)| RayHit {
                point: origin + direction * distance,
                side,
                distance,
            })
    }
}

/// Slab test of a normalized ray against `aabb`.
///
/// # Returns
/// The entry distance and entry face, or `None` if the ray misses the box or
/// starts inside it.
fn ray_box_entry(
    origin: Point3<f32>,
    direction: Vector3<f32>,
    aabb: &Aabb,
) -> Option<(f32, BlockSide)> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut entry_axis = None;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

        if d.abs() < 1e-8 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let t1 = (lo - o) / d;
        let t2 = (hi - o) / d;
        let (axis_near, axis_far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        if axis_near > t_near {
            t_near = axis_near;
            entry_axis = Some(axis);
        }
        t_far = t_far.min(axis_far);
        if t_near > t_far {
            return None;
        }
    }

    let axis = entry_axis?;
    if t_near < 0.0 {
        return None;
    }
    Some((t_near, BlockSide::entered_through(axis, direction[axis])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    #[test]
    fn looking_down_hits_top_face() {
        let mut world = World::new();
        world.set(Point3::new(2, 0, 2), BlockType::GRASS);
        let raycaster = BlockRaycaster::new(&world);

        let hit = raycaster
            .cast(Point3::new(2.5, 3.0, 2.5), Vector3::new(0.0, -1.0, 0.0), 8.0)
            .unwrap();
        assert_eq!(hit.side, BlockSide::TOP);
        assert!((hit.distance - 2.0).abs() < 1e-5);
        assert_eq!(hit.target_cell(), Point3::new(2, 0, 2));
        assert_eq!(hit.adjacent_cell(), Point3::new(2, 1, 2));
    }

    #[test]
    fn nearest_block_wins() {
        let mut world = World::new();
        world.set(Point3::new(3, 1, 0), BlockType::STONE);
        world.set(Point3::new(6, 1, 0), BlockType::STONE);
        let raycaster = BlockRaycaster::new(&world);

        let hit = raycaster
            .cast(Point3::new(0.5, 1.5, 0.5), Vector3::new(1.0, 0.0, 0.0), 8.0)
            .unwrap();
        assert_eq!(hit.side, BlockSide::LEFT);
        assert_eq!(hit.target_cell(), Point3::new(3, 1, 0));
        assert_eq!(hit.adjacent_cell(), Point3::new(2, 1, 0));
    }

    #[test]
    fn positive_faces_map_back_to_the_hit_block() {
        let mut world = World::new();
        world.set(Point3::new(0, 1, 0), BlockType::STONE);
        let raycaster = BlockRaycaster::new(&world);

        let hit = raycaster
            .cast(Point3::new(4.5, 1.5, 0.5), Vector3::new(-1.0, 0.0, 0.0), 8.0)
            .unwrap();
        assert_eq!(hit.side, BlockSide::RIGHT);
        assert_eq!(hit.target_cell(), Point3::new(0, 1, 0));
        assert_eq!(hit.adjacent_cell(), Point3::new(1, 1, 0));
    }

    #[test]
    fn reach_and_misses() {
        let mut world = World::new();
        world.set(Point3::new(10, 0, 0), BlockType::STONE);
        let raycaster = BlockRaycaster::new(&world);
        let origin = Point3::new(0.5, 0.5, 0.5);

        assert!(raycaster.cast(origin, Vector3::new(1.0, 0.0, 0.0), 8.0).is_none());
        assert!(raycaster.cast(origin, Vector3::new(1.0, 0.0, 0.0), 12.0).is_some());
        assert!(raycaster.cast(origin, Vector3::new(-1.0, 0.0, 0.0), 100.0).is_none());
        assert!(raycaster.cast(origin, Vector3::new(0.0, 0.0, 0.0), 100.0).is_none());
    }
}
