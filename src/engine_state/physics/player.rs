//! # Player Movement
//!
//! Per-tick kinematics for the avatar: key intent is turned into horizontal
//! acceleration, friction and gravity are applied, and the tentative position
//! is checked against the world.
//!
//! ## Collision rules
//!
//! Every block overlapping the tentative hitbox is classified:
//! - **step**: its top is at most `step_height` above the tentative feet. The
//!   player is lifted to rest on the highest such top.
//! - **blocking**: anything else. If any blocking block exists the whole move
//!   is rejected and horizontal velocity is zeroed.
//!
//! Classification looks at all overlapping blocks, so the result does not
//! depend on iteration order.

use cgmath::{InnerSpace, Point3, Vector3, Zero};

use super::aabb::Aabb;
use crate::application_state::config::PlayerConfig;
use crate::engine_state::{camera_state::Camera, voxels::world::World};

/// Reference frame rate the per-frame constants are tuned for.
pub const BASELINE_FPS: f32 = 60.0;

/// Held movement keys and the jump edge for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    /// Jump was pressed this tick.
    pub jump: bool,
}

/// What the collision step did with the tentative move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementOutcome {
    /// The move was committed. `lift` is the step-lift added to Y (0 if none).
    Moved { lift: f32 },
    /// A blocking block overlapped the tentative hitbox; position is unchanged.
    Blocked,
}

/// Kinematic state of the player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Eye position. The feet are `eye_level` below it.
    pub position: Point3<f32>,
    /// Velocity in blocks per 60 Hz frame.
    pub velocity: Vector3<f32>,
    /// Whether the sprint key is held.
    pub sprinting: bool,
    /// Hotbar slot used by place.
    pub selected_slot: usize,
    /// Whether the player is resting on something. Set by a step-lift or the
    /// floor clamp, cleared by any other committed move.
    pub grounded: bool,
}

impl PlayerState {
    /// Creates a player at the configured spawn point, at rest.
    pub fn new(config: &PlayerConfig) -> Self {
        let [x, y, z] = config.spawn;
        Self::at(Point3::new(x, y, z))
    }

    /// Creates a player with its eye at `position`, at rest.
    pub fn at(position: Point3<f32>) -> Self {
        PlayerState {
            position,
            velocity: Vector3::zero(),
            sprinting: false,
            selected_slot: 0,
            grounded: false,
        }
    }

    /// Whether the sprint indicator should be shown.
    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    /// Feet position for an eye position.
    fn feet_of(position: Point3<f32>, config: &PlayerConfig) -> Point3<f32> {
        Point3::new(position.x, position.y - config.eye_level, position.z)
    }

    /// Hitbox at the current position.
    pub fn aabb(&self, config: &PlayerConfig) -> Aabb {
        Self::hitbox_at(self.position, config)
    }

    /// Hitbox for an eye position.
    pub fn hitbox_at(position: Point3<f32>, config: &PlayerConfig) -> Aabb {
        Aabb::from_foot(Self::feet_of(position, config), config.width, config.height)
    }

    /// Current horizontal speed cap.
    pub fn max_speed(&self, config: &PlayerConfig) -> f32 {
        if self.sprinting {
            config.base_speed * config.sprint_multiplier
        } else {
            config.base_speed
        }
    }

    /// Advances the player by one tick of `dt` seconds.
    pub fn step(
        &mut self,
        world: &World,
        camera: &Camera,
        intent: &MovementIntent,
        dt: f32,
        config: &PlayerConfig,
    ) -> MovementOutcome {
        let frame_scale = dt * BASELINE_FPS;
        self.sprinting = intent.sprint;

        let direction = movement_direction(camera, intent);
        self.velocity.x += direction.x * config.acceleration * frame_scale;
        self.velocity.z += direction.z * config.acceleration * frame_scale;
        self.velocity.x *= config.friction;
        self.velocity.z *= config.friction;
        self.velocity.y -= config.gravity * frame_scale;

        let max_speed = self.max_speed(config);
        let horizontal_speed = self.velocity.x.hypot(self.velocity.z);
        if horizontal_speed > max_speed {
            let scale = max_speed / horizontal_speed;
            self.velocity.x *= scale;
            self.velocity.z *= scale;
        }

        if intent.jump && self.grounded {
            self.velocity.y = config.jump_strength;
        }

        let tentative = self.position + self.velocity * frame_scale;
        let outcome = match resolve_collision(world, tentative, config) {
            Some(support_top) => {
                let mut committed = tentative;
                let lift = match support_top {
                    Some(top) => {
                        let lift = top - (tentative.y - config.eye_level);
                        committed.y = top + config.eye_level;
                        lift
                    }
                    None => 0.0,
                };
                self.position = committed;
                self.grounded = support_top.is_some();
                if self.grounded && self.velocity.y < 0.0 {
                    self.velocity.y = 0.0;
                }
                MovementOutcome::Moved { lift }
            }
            None => {
                log::trace!("Move to {tentative:?} blocked");
                self.velocity.x = 0.0;
                self.velocity.z = 0.0;
                // Position is unchanged, so the support under the feet is too.
                if self.grounded && self.velocity.y < 0.0 {
                    self.velocity.y = 0.0;
                }
                MovementOutcome::Blocked
            }
        };

        if self.position.y < config.eye_level {
            self.position.y = config.eye_level;
            self.velocity.y = 0.0;
            self.grounded = true;
        }

        outcome
    }
}

/// Normalized horizontal direction from the held keys, or zero.
pub fn movement_direction(camera: &Camera, intent: &MovementIntent) -> Vector3<f32> {
    let forward = camera.forward();
    let right = camera.right();
    let mut direction = Vector3::zero();
    if intent.forward {
        direction += forward;
    }
    if intent.backward {
        direction -= forward;
    }
    if intent.right {
        direction += right;
    }
    if intent.left {
        direction -= right;
    }
    direction.y = 0.0;
    if direction.magnitude2() > 0.0 {
        direction.normalize()
    } else {
        direction
    }
}

/// Classifies every block under the hitbox at eye position `tentative`.
///
/// # Returns
/// - `None` if any blocking block overlaps (the move must be rejected)
/// - `Some(None)` if nothing overlaps
/// - `Some(Some(top))` with the highest step block top to rest on
fn resolve_collision(
    world: &World,
    tentative: Point3<f32>,
    config: &PlayerConfig,
) -> Option<Option<f32>> {
    let hitbox = PlayerState::hitbox_at(tentative, config);
    let feet_y = hitbox.min.y;
    let mut support_top: Option<f32> = None;
    let mut blocked = false;

    for (cell, block_type) in world.overlapping_blocks(&hitbox) {
        if block_type.is_fluid() && !config.water_is_solid {
            continue;
        }
        let top = (cell.y + 1) as f32;
        if top <= feet_y + config.step_height {
            support_top = Some(support_top.map_or(top, |current| current.max(top)));
        } else {
            blocked = true;
        }
    }

    if blocked {
        None
    } else {
        Some(support_top)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Deg;

    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    const DT: f32 = 1.0 / 60.0;

    fn floor_world(size: i32) -> World {
        let mut world = World::new();
        for x in 0..size {
            for z in 0..size {
                world.set(Point3::new(x, 0, z), BlockType::STONE);
            }
        }
        world
    }

    fn camera() -> Camera {
        Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0))
    }

    fn standing_on_floor(config: &PlayerConfig) -> PlayerState {
        let mut player = PlayerState::at(Point3::new(4.5, 1.0 + config.eye_level, 4.5));
        player.grounded = true;
        player
    }

    #[test]
    fn resting_player_stays_put() {
        let config = PlayerConfig::default();
        let world = floor_world(9);
        let mut player = standing_on_floor(&config);
        let start = player.position;

        let outcome = player.step(&world, &camera(), &MovementIntent::default(), DT, &config);

        assert!(matches!(outcome, MovementOutcome::Moved { lift } if lift > 0.0));
        assert!((player.position.y - start.y).abs() < 1e-5);
        assert_eq!(player.position.x, start.x);
        assert_eq!(player.position.z, start.z);
        assert!(player.grounded);
        assert_eq!(player.velocity.y, 0.0);
    }

    #[test]
    fn resting_player_stays_put_for_many_ticks() {
        let config = PlayerConfig::default();
        let world = floor_world(9);
        let mut player = standing_on_floor(&config);
        let start = player.position;
        for _ in 0..600 {
            player.step(&world, &camera(), &MovementIntent::default(), DT, &config);
        }
        assert!((player.position.y - start.y).abs() < 1e-4);
    }

    #[test]
    fn friction_decays_horizontal_velocity() {
        let config = PlayerConfig::default();
        let world = floor_world(9);
        let mut player = standing_on_floor(&config);
        player.velocity.x = 0.05;
        player.step(&world, &camera(), &MovementIntent::default(), DT, &config);
        assert!((player.velocity.x - 0.05 * 0.85).abs() < 1e-6);
    }

    #[test]
    fn horizontal_speed_is_capped() {
        let config = PlayerConfig::default();
        let world = floor_world(9);
        let mut player = standing_on_floor(&config);
        player.velocity.x = 1.0;
        player.velocity.z = 1.0;
        player.step(&world, &camera(), &MovementIntent::default(), DT, &config);
        let speed = player.velocity.x.hypot(player.velocity.z);
        assert!((speed - config.base_speed).abs() < 1e-6);

        let sprint = MovementIntent {
            sprint: true,
            ..Default::default()
        };
        player.velocity.x = 1.0;
        player.step(&world, &camera(), &sprint, DT, &config);
        let speed = player.velocity.x.hypot(player.velocity.z);
        assert!((speed - config.base_speed * config.sprint_multiplier).abs() < 1e-6);
        assert!(player.is_sprinting());
    }

    #[test]
    fn walking_forward_moves_along_view() {
        let config = PlayerConfig::default();
        let world = floor_world(9);
        let mut player = standing_on_floor(&config);
        let intent = MovementIntent {
            forward: true,
            ..Default::default()
        };
        for _ in 0..30 {
            player.step(&world, &camera(), &intent, DT, &config);
        }
        assert!(player.position.x > 4.5);
        assert!((player.position.z - 4.5).abs() < 1e-5);
        assert!((player.position.y - (1.0 + config.eye_level)).abs() < 1e-4);
    }

    #[test]
    fn jump_requires_ground() {
        let config = PlayerConfig::default();
        let world = floor_world(9);
        let jump = MovementIntent {
            jump: true,
            ..Default::default()
        };

        let mut airborne = PlayerState::at(Point3::new(4.5, 6.0, 4.5));
        airborne.step(&world, &camera(), &jump, DT, &config);
        assert!(airborne.velocity.y < 0.0);

        let mut player = standing_on_floor(&config);
        let start_y = player.position.y;
        player.step(&world, &camera(), &jump, DT, &config);
        assert_eq!(player.velocity.y, config.jump_strength);
        assert!(player.position.y > start_y);
        assert!(!player.grounded);
    }

    #[test]
    fn wall_blocks_the_whole_move() {
        let config = PlayerConfig::default();
        let mut world = floor_world(9);
        world.set(Point3::new(5, 1, 4), BlockType::STONE);
        let mut player = standing_on_floor(&config);
        // Hitbox edge at x = 4.98; after friction the move pushes it past x = 5.
        player.position.x = 4.68;
        player.velocity.x = 0.05;
        let start = player.position;

        let outcome = player.step(&world, &camera(), &MovementIntent::default(), DT, &config);
        assert_eq!(outcome, MovementOutcome::Blocked);
        assert_eq!(player.position, start);
        assert_eq!(player.velocity.x, 0.0);
        assert_eq!(player.velocity.z, 0.0);
    }

    #[test]
    fn blocking_wins_regardless_of_step_blocks() {
        let config = PlayerConfig::default();
        let mut world = World::new();
        // A low step under the feet and a wall at head height in the same box.
        world.set(Point3::new(4, 0, 4), BlockType::STONE);
        world.set(Point3::new(4, 2, 4), BlockType::STONE);
        assert_eq!(
            resolve_collision(&world, Point3::new(4.5, 0.9 + config.eye_level, 4.5), &config),
            None
        );
    }

    #[test]
    fn step_lift_rests_on_block_top() {
        let config = PlayerConfig::default();
        let mut world = World::new();
        world.set(Point3::new(4, 0, 4), BlockType::STONE);
        world.set(Point3::new(5, 1, 4), BlockType::STONE);
        // Feet at 1.6 clear (4,0,4); the top of (5,1,4) is within the step height.
        let eye = Point3::new(4.9, 1.6 + config.eye_level, 4.5);
        assert_eq!(resolve_collision(&world, eye, &config), Some(Some(2.0)));
    }

    #[test]
    fn falls_until_floor_clamp() {
        let config = PlayerConfig::default();
        let world = World::new();
        let mut player = PlayerState::at(Point3::new(0.5, 3.0, 0.5));
        for _ in 0..200 {
            player.step(&world, &camera(), &MovementIntent::default(), DT, &config);
        }
        assert_eq!(player.position.y, config.eye_level);
        assert_eq!(player.velocity.y, 0.0);
        assert!(player.grounded);
    }

    #[test]
    fn water_can_be_made_passable() {
        let mut config = PlayerConfig::default();
        let mut world = World::new();
        world.set(Point3::new(4, 1, 4), BlockType::WATER);
        let eye = Point3::new(4.5, 1.0 + config.eye_level, 4.5);
        assert_eq!(resolve_collision(&world, eye, &config), None);

        config.water_is_solid = false;
        assert_eq!(resolve_collision(&world, eye, &config), Some(None));
    }

    #[test]
    fn diagonal_direction_is_normalized() {
        let intent = MovementIntent {
            forward: true,
            right: true,
            ..Default::default()
        };
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(10.0), Deg(40.0));
        let direction = movement_direction(&camera, &intent);
        assert!((direction.magnitude() - 1.0).abs() < 1e-5);
        assert_eq!(direction.y, 0.0);
        assert_eq!(
            movement_direction(&camera, &MovementIntent::default()),
            Vector3::zero()
        );
    }
}
