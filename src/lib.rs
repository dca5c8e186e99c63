#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! A small block-world simulation: seeded terrain generation, a sparse voxel
//! map with bounding-box queries, and a per-tick player step covering
//! movement, collision, break and place.
//!
//! ## Key Modules
//!
//! * `application_state` - Configuration, input tracking and the tick loop
//! * `engine_state` - The simulation itself: world, player, camera, visibility
//!
//! ## Architecture
//!
//! The simulation is single-threaded and tick-driven. A host calls
//! [`EngineState::tick`] once per frame with the player's actions; the engine
//! mutates the world and player and pushes cube add/remove calls through the
//! [`BlockRenderer`] trait. Drawing and windowing belong to the host.
//!
//! ## Usage
//!
//! ```rust
//! use voxel_sandbox::{generate, BlockType};
//!
//! let world = generate(7);
//! assert!(world.iter().any(|(_, block)| block == BlockType::GRASS));
//! ```
//!
//! The bundled binary runs a scripted session headless:
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- config.json
//! ```

use log::info;

pub mod application_state;
pub mod engine_state;

pub use application_state::{
    config::{ConfigError, SandboxConfig},
    demo_script, RunSummary, SandboxApplication, ScriptedInput,
};
pub use engine_state::{
    camera_state::Camera,
    interaction::{
        raycast::{BlockRaycaster, RayHit, RayQuery},
        InteractionOutcome,
    },
    physics::{
        aabb::Aabb,
        player::{MovementIntent, MovementOutcome, PlayerState},
    },
    rendering::{BlockRenderer, CubeInstanceRecorder, VisibilityDiff, VisibleSet},
    voxels::{
        block::{block_side::BlockSide, block_type::BlockType},
        generation::{generate, Biome, WorldGenerator},
        world::World,
    },
    EngineState, PlayerAction, TickReport,
};

/// Runs the headless sandbox: loads the config named by the first argument,
/// generates the world and plays the demo script.
pub fn run() -> Result<(), ConfigError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config_path = std::env::args().nth(1);
    let config = SandboxConfig::load_or_default(config_path.as_deref())?;

    let seed = match config.simulation.seed {
        Some(seed) => seed,
        None => {
            let seed = fastrand::u32(..);
            info!("No seed configured, using {seed}");
            seed
        }
    };

    let mut app = SandboxApplication::new(config, seed, CubeInstanceRecorder::new());
    let summary = app.run_script(&demo_script());

    let (adds, removes) = app.renderer.call_counts();
    info!(
        "Ran {} ticks in {:?}: {} broken, {} placed, {} rejected, player at {:?}",
        summary.ticks,
        app.started_at.elapsed(),
        summary.blocks_broken,
        summary.blocks_placed,
        summary.rejected_interactions,
        summary.final_position
    );
    info!(
        "{} cubes rendered ({} blended) after {adds} adds and {removes} removes",
        summary.rendered_cubes,
        app.renderer.transparent_count()
    );
    Ok(())
}
