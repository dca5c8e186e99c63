//! # Engine State Module
//!
//! The simulation context of the sandbox: the voxel world, the player, the
//! camera at the player's eye and the set of cubes handed to the renderer.
//!
//! ## Key Components
//!
//! * `EngineState` - Owns every piece of mutable simulation state
//! * `camera_state` - Yaw/pitch camera and mouse look
//! * `interaction` - View ray queries, break and place
//! * `physics` - Bounding boxes, player movement and collision
//! * `rendering` - Renderer seam and render-distance culling
//! * `voxels` - Block types, the world map and world generation
//!
//! ## Tick order
//!
//! Each call to [`EngineState::tick`] runs, in order: look, hotbar selection,
//! movement with collision, break/place, visibility. There is exactly one
//! mutator of the world and the player, so nothing here is synchronized.

use cgmath::Deg;
use winit::{event::MouseButton, keyboard::KeyCode};

use camera_state::Camera;
use interaction::{
    raycast::{BlockRaycaster, RayHit, RayQuery},
    InteractionOutcome,
};
use physics::player::{MovementIntent, MovementOutcome, PlayerState};
use rendering::{BlockRenderer, VisibilityDiff, VisibleSet};
use voxels::{block::block_type::BlockType, generation::WorldGenerator, world::World};

use crate::application_state::{
    config::SandboxConfig,
    input_manager::HOTBAR_KEYS,
    input_state::ProcessedInputState,
};

pub mod camera_state;
pub mod interaction;
pub mod physics;
pub mod rendering;
pub mod voxels;

/// Everything the player asked for during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerAction {
    /// Held movement keys and the jump edge
    pub movement: MovementIntent,
    /// Mouse movement since the last tick
    pub look_delta: Option<(f64, f64)>,
    /// Break edge
    pub break_block: bool,
    /// Place edge
    pub place_block: bool,
    /// Hotbar slot edge
    pub select_slot: Option<usize>,
}

/// What a tick did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub movement: MovementOutcome,
    /// Break and place results, in that order
    pub interactions: Vec<InteractionOutcome>,
    pub visibility: VisibilityDiff,
}

/// The main state container for the sandbox simulation.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::{CubeInstanceRecorder, EngineState, PlayerAction, SandboxConfig};
///
/// let mut engine = EngineState::new(SandboxConfig::default(), 42);
/// let mut renderer = CubeInstanceRecorder::new();
///
/// let report = engine.tick(&PlayerAction::default(), 1.0 / 60.0, &mut renderer);
/// assert!(report.interactions.is_empty());
/// assert_eq!(renderer.len(), engine.visible_set.len());
/// ```
#[derive(Debug)]
pub struct EngineState {
    /// Validated configuration the state was built from
    pub config: SandboxConfig,
    /// The voxel world
    pub world: World,
    /// Player kinematics and hotbar selection
    pub player: PlayerState,
    /// First-person camera, kept at the player's eye
    pub camera: Camera,
    /// Cubes currently handed to the renderer
    pub visible_set: VisibleSet,
    seed: u32,
}

impl EngineState {
    /// Generates the world for `seed` and spawns the player.
    pub fn new(config: SandboxConfig, seed: u32) -> Self {
        let generator = WorldGenerator::new(config.generation.clone(), seed);
        let (world, stats) = generator.generate_with_stats();
        log::debug!("Generation stats: {stats:?}");
        let mut state = Self::with_world(config, world);
        state.seed = seed;
        state
    }

    /// Wraps an existing world and spawns the player.
    ///
    /// A spawn point buried in terrain is lifted so the feet rest on the
    /// highest block under the hitbox.
    pub fn with_world(config: SandboxConfig, world: World) -> Self {
        let mut player = PlayerState::new(&config.player);
        if let Some(eye_y) = lifted_spawn_height(&world, &player, &config) {
            log::warn!(
                "Spawn {:?} is inside terrain, lifting eye to y = {eye_y}",
                player.position
            );
            player.position.y = eye_y;
        }
        let camera = Camera::new(player.position, Deg(0.0), Deg(0.0));
        let visible_set = VisibleSet::new(
            config.render.render_distance,
            config.render.low_performance,
        );
        Self {
            config,
            world,
            player,
            camera,
            visible_set,
            seed: 0,
        }
    }

    /// Seed the world was generated from. Zero for supplied worlds.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Block type in the selected hotbar slot.
    pub fn selected_block_type(&self) -> Option<BlockType> {
        self.config
            .player
            .hotbar
            .get(self.player.selected_slot)
            .copied()
    }

    /// Selects a hotbar slot. Indices outside the hotbar are ignored.
    pub fn select_slot(&mut self, slot: usize) -> bool {
        if slot < self.config.player.hotbar.len() {
            self.player.selected_slot = slot;
            true
        } else {
            log::debug!("Ignoring hotbar slot {slot}");
            false
        }
    }

    /// Nearest block surface along the view ray, within reach.
    pub fn cast_view_ray(&self) -> Option<RayHit> {
        BlockRaycaster::new(&self.world).cast(
            self.camera.position,
            self.camera.forward(),
            self.config.player.reach,
        )
    }

    /// Removes the block under the view ray and its cube instance.
    pub fn break_targeted<R: BlockRenderer + ?Sized>(
        &mut self,
        renderer: &mut R,
    ) -> InteractionOutcome {
        let hit = self.cast_view_ray();
        let outcome = interaction::break_block(&mut self.world, hit);
        if let InteractionOutcome::Broken { cell, .. } = outcome {
            self.visible_set.remove(cell, renderer);
        }
        outcome
    }

    /// Places the selected block in front of the targeted face.
    pub fn place_targeted<R: BlockRenderer + ?Sized>(
        &mut self,
        renderer: &mut R,
    ) -> InteractionOutcome {
        let Some(block_type) = self.selected_block_type() else {
            return InteractionOutcome::EmptySlot;
        };
        let hit = self.cast_view_ray();
        let player_box = self.player.aabb(&self.config.player);
        let outcome = interaction::place_block(&mut self.world, hit, block_type, &player_box);
        if let InteractionOutcome::Placed { cell, block_type } = outcome {
            self.visible_set
                .insert(cell, block_type, self.player.position, renderer);
        }
        outcome
    }

    /// Advances the simulation by one tick of `dt` seconds.
    pub fn tick<R: BlockRenderer + ?Sized>(
        &mut self,
        action: &PlayerAction,
        dt: f32,
        renderer: &mut R,
    ) -> TickReport {
        let player_config = &self.config.player;

        if let Some(delta) = action.look_delta {
            self.camera.rotate(
                delta,
                player_config.mouse_sensitivity,
                dt,
                Deg(player_config.pitch_limit_degrees),
            );
        }

        if let Some(slot) = action.select_slot {
            self.select_slot(slot);
        }

        let movement = self.player.step(
            &self.world,
            &self.camera,
            &action.movement,
            dt,
            &self.config.player,
        );
        self.camera.position = self.player.position;

        let mut interactions = Vec::new();
        if action.break_block {
            interactions.push(self.break_targeted(renderer));
        }
        if action.place_block {
            interactions.push(self.place_targeted(renderer));
        }

        let visibility = self
            .visible_set
            .recompute(&self.world, self.player.position, renderer);

        TickReport {
            movement,
            interactions,
            visibility,
        }
    }

    /// Translates the processed input state into player actions.
    ///
    /// Movement and sprint follow held keys; jump, break, place and hotbar
    /// selection fire on the press edge only.
    pub fn translate_processed_input(input: &ProcessedInputState) -> PlayerAction {
        let movement = MovementIntent {
            forward: input.get_key_state(KeyCode::KeyW).is_active(),
            backward: input.get_key_state(KeyCode::KeyS).is_active(),
            left: input.get_key_state(KeyCode::KeyA).is_active(),
            right: input.get_key_state(KeyCode::KeyD).is_active(),
            sprint: input.get_key_state(KeyCode::ShiftLeft).is_active(),
            jump: input.get_key_state(KeyCode::Space).is_just_pressed(),
        };

        let select_slot = HOTBAR_KEYS
            .iter()
            .position(|key| input.get_key_state(*key).is_just_pressed());

        PlayerAction {
            movement,
            look_delta: input.get_mouse_delta(),
            break_block: input
                .get_mouse_button_state(MouseButton::Left)
                .is_just_pressed(),
            place_block: input
                .get_mouse_button_state(MouseButton::Right)
                .is_just_pressed(),
            select_slot,
        }
    }
}

/// Eye height that puts the player's feet on top of the tallest column under
/// its hitbox, or `None` when the spawn hitbox is already clear.
fn lifted_spawn_height(world: &World, player: &PlayerState, config: &SandboxConfig) -> Option<f32> {
    let hitbox = player.aabb(&config.player);
    if !world.overlaps_any_block(&hitbox) {
        return None;
    }
    let (low, high) = hitbox.cell_range();
    let top = (low.x..=high.x)
        .flat_map(|x| (low.z..=high.z).map(move |z| (x, z)))
        .filter_map(|(x, z)| world.column_top(x, z))
        .max()?;
    Some((top + 1) as f32 + config.player.eye_level)
}
