//! # Sandbox Configuration
//!
//! Tunables for generation, player physics, rendering and the run loop.
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "simulation": { "seed": 42 }, "render": { "render_distance": 8 } }
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::block::block_type::{BlockType, HOTBAR_SIZE};

/// Errors raised while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {field}")]
    Invalid { field: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub generation: GenerationConfig,
    pub player: PlayerConfig,
    pub render: RenderConfig,
    pub simulation: SimulationConfig,
}

/// Parameters of the three generation passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Side length of the square terrain footprint, in columns.
    pub terrain_size: i32,
    pub max_height: i32,
    pub height_frequency: f64,
    pub biome_frequency: f64,
    pub water_frequency: f64,
    pub cave_frequency: f64,
    /// Biome noise above this is `mountain`.
    pub mountain_threshold: f64,
    /// Biome noise above this (and not mountain) is `forest`.
    pub forest_threshold: f64,
    /// Water noise below this marks a pool in low plains columns.
    pub water_threshold: f64,
    /// Plains columns at or above this height never get water.
    pub water_max_height: i32,
    /// Cave noise above this carves the cell.
    pub cave_threshold: f64,
    pub coal_chance: f64,
    pub forest_tree_chance: f64,
    pub plains_tree_chance: f64,
    pub trunk_min_height: u32,
    pub trunk_max_height: u32,
    pub foliage_chance: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            terrain_size: 32,
            max_height: 12,
            height_frequency: 0.08,
            biome_frequency: 0.02,
            water_frequency: 0.05,
            cave_frequency: 0.15,
            mountain_threshold: 0.4,
            forest_threshold: -0.1,
            water_threshold: -0.5,
            water_max_height: 6,
            cave_threshold: 0.75,
            coal_chance: 0.15,
            forest_tree_chance: 0.08,
            plains_tree_chance: 0.02,
            trunk_min_height: 3,
            trunk_max_height: 4,
            foliage_chance: 0.8,
        }
    }
}

/// Player body and movement constants. Speeds and accelerations are per
/// 60 Hz frame; the physics step scales them by `dt * 60`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial eye position.
    pub spawn: [f32; 3],
    pub height: f32,
    pub width: f32,
    /// Distance from the feet to the eye point.
    pub eye_level: f32,
    pub base_speed: f32,
    pub sprint_multiplier: f32,
    pub jump_strength: f32,
    pub gravity: f32,
    pub friction: f32,
    pub acceleration: f32,
    /// Blocks whose top is within this distance above the feet are stepped onto.
    pub step_height: f32,
    /// Degrees of rotation per unit of mouse delta per second.
    pub mouse_sensitivity: f32,
    pub pitch_limit_degrees: f32,
    /// Maximum ray length for break and place.
    pub reach: f32,
    /// Whether water blocks the player's movement.
    pub water_is_solid: bool,
    /// Block types selectable from the hotbar, in slot order.
    pub hotbar: Vec<BlockType>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            spawn: [16.0, 8.0, 16.0],
            height: 1.8,
            width: 0.6,
            eye_level: 1.62,
            base_speed: 0.06,
            sprint_multiplier: 1.5,
            jump_strength: 0.18,
            gravity: 0.004,
            friction: 0.85,
            acceleration: 0.005,
            step_height: 0.5,
            mouse_sensitivity: 0.2,
            pitch_limit_degrees: 85.0,
            reach: 8.0,
            water_is_solid: true,
            hotbar: (0..HOTBAR_SIZE)
                .filter_map(BlockType::from_hotbar_slot)
                .collect(),
        }
    }
}

/// Visibility culling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Horizontal Chebyshev radius, in blocks, around the player's column.
    pub render_distance: i32,
    /// Tear down and rebuild every cube instance on each recompute.
    pub low_performance: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            render_distance: 12,
            low_performance: false,
        }
    }
}

/// Run loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// World seed. A random seed is drawn when absent.
    pub seed: Option<u32>,
    /// Fixed tick rate of the headless loop.
    pub tick_rate: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            seed: None,
            tick_rate: 60.0,
        }
    }
}

impl SandboxConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// Parses and validates a JSON config string.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: SandboxConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                log::info!("Loading config from {}", path.as_ref().display());
                Self::load(path)
            }
            None => {
                log::debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let generation = &self.generation;
        let player = &self.player;

        check(generation.terrain_size > 0, "generation.terrain_size")?;
        check(generation.max_height > 0, "generation.max_height")?;
        check(
            generation.trunk_min_height <= generation.trunk_max_height,
            "generation.trunk_min_height",
        )?;
        check(player.height > 0.0, "player.height")?;
        check(player.width > 0.0, "player.width")?;
        check(
            player.eye_level > 0.0 && player.eye_level <= player.height,
            "player.eye_level",
        )?;
        check(
            player.friction > 0.0 && player.friction <= 1.0,
            "player.friction",
        )?;
        check(player.base_speed > 0.0, "player.base_speed")?;
        check(player.reach > 0.0, "player.reach")?;
        check(!player.hotbar.is_empty(), "player.hotbar")?;
        check(self.render.render_distance >= 0, "render.render_distance")?;
        check(self.simulation.tick_rate > 0.0, "simulation.tick_rate")?;
        Ok(())
    }
}

fn check(condition: bool, field: &str) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field: field.to_string(),
        })
    }
}
