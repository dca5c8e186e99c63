//! # Application State Management
//!
//! The outer shell around the simulation:
//! - Configuration loading
//! - Input handling (window events or scripted input)
//! - The fixed-rate tick loop that drives `EngineState`

pub mod config;
pub mod input_manager;
pub mod input_state;

use cgmath::Point3;
use input_manager::InputManager;
use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::engine_state::{
    interaction::InteractionOutcome, rendering::BlockRenderer, EngineState, TickReport,
};
use config::SandboxConfig;

/// One step of a scripted input sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptedInput {
    /// Holds a key down from the next tick on.
    Press(KeyCode),
    /// Releases a held key.
    Release(KeyCode),
    /// Presses a mouse button for one tick.
    Click(MouseButton),
    /// Adds a mouse movement sample for the next tick.
    Look(f64, f64),
    /// Runs this many ticks.
    Wait(u32),
}

/// Totals of a scripted run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub blocks_broken: usize,
    pub blocks_placed: usize,
    /// Break or place attempts that left the world unchanged
    pub rejected_interactions: usize,
    pub final_position: Point3<f32>,
    pub rendered_cubes: usize,
}

/// Owns the simulation, the input manager and the renderer, and feeds
/// processed input into the engine once per tick.
pub struct SandboxApplication<R: BlockRenderer> {
    /// The simulation context
    pub engine_state: EngineState,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Receives cube add/remove calls
    pub renderer: R,

    /// Timestamp of the application start for wall-clock reporting
    pub started_at: web_time::Instant,

    summary: RunSummary,
}

impl<R: BlockRenderer> SandboxApplication<R> {
    /// Generates the world for `seed` and wires up input and rendering.
    pub fn new(config: SandboxConfig, seed: u32, renderer: R) -> Self {
        Self::from_engine(EngineState::new(config, seed), renderer)
    }

    /// Wraps an existing engine state.
    pub fn from_engine(engine_state: EngineState, renderer: R) -> Self {
        let summary = RunSummary {
            ticks: 0,
            blocks_broken: 0,
            blocks_placed: 0,
            rejected_interactions: 0,
            final_position: engine_state.player.position,
            rendered_cubes: 0,
        };
        Self {
            engine_state,
            input_manager: InputManager::new(),
            renderer,
            started_at: web_time::Instant::now(),
            summary,
        }
    }

    /// Fixed tick length in seconds.
    pub fn tick_duration(&self) -> f32 {
        1.0 / self.engine_state.config.simulation.tick_rate
    }

    /// Feeds a window event to the input manager.
    ///
    /// # Returns
    /// `false` when the event asks the application to exit.
    pub fn window_event(&mut self, event: &WindowEvent) -> bool {
        self.input_manager.intake_input(event);
        match event {
            WindowEvent::Focused(false) => {
                self.input_manager.release_all();
                true
            }
            WindowEvent::CloseRequested => false,
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key,
                        ..
                    },
                ..
            } => !requests_exit(*physical_key, *state),
            _ => true,
        }
    }

    /// Feeds a raw mouse motion sample to the input manager.
    pub fn mouse_motion(&mut self, delta: (f64, f64)) {
        self.input_manager.intake_mouse_motion(delta);
    }

    /// Runs one tick with the input gathered since the previous one.
    pub fn step(&mut self) -> TickReport {
        let dt = self.tick_duration();
        let processed_input = self.input_manager.get_and_reset_processed_input();
        let action = EngineState::translate_processed_input(&processed_input);
        let report = self.engine_state.tick(&action, dt, &mut self.renderer);
        self.record(&report);
        report
    }

    /// Runs `count` ticks.
    pub fn run_ticks(&mut self, count: u32) {
        for _ in 0..count {
            self.step();
        }
    }

    /// Plays a scripted input sequence and returns the run totals.
    pub fn run_script(&mut self, script: &[ScriptedInput]) -> RunSummary {
        for input in script {
            match *input {
                ScriptedInput::Press(key) => self.input_manager.set_key_state(key, true),
                ScriptedInput::Release(key) => self.input_manager.set_key_state(key, false),
                ScriptedInput::Click(button) => {
                    self.input_manager.set_mouse_button_state(button, true);
                    self.step();
                    self.input_manager.set_mouse_button_state(button, false);
                }
                ScriptedInput::Look(x, y) => self.mouse_motion((x, y)),
                ScriptedInput::Wait(ticks) => self.run_ticks(ticks),
            }
        }
        self.summary()
    }

    /// Totals so far.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            final_position: self.engine_state.player.position,
            rendered_cubes: self.engine_state.visible_set.len(),
            ..self.summary.clone()
        }
    }

    fn record(&mut self, report: &TickReport) {
        self.summary.ticks += 1;
        for outcome in &report.interactions {
            match outcome {
                InteractionOutcome::Broken { .. } => self.summary.blocks_broken += 1,
                InteractionOutcome::Placed { .. } => self.summary.blocks_placed += 1,
                _ => self.summary.rejected_interactions += 1,
            }
        }
        if !report.visibility.is_empty() {
            log::debug!(
                "Tick {}: {} cubes added, {} removed",
                self.summary.ticks,
                report.visibility.added.len(),
                report.visibility.removed.len()
            );
        }
    }
}

/// Whether a key transition asks the sandbox to exit: Escape going down.
fn requests_exit(physical_key: PhysicalKey, state: ElementState) -> bool {
    state == ElementState::Pressed && physical_key == PhysicalKey::Code(KeyCode::Escape)
}

/// The walk, jump, break and place sequence the headless binary plays.
pub fn demo_script() -> Vec<ScriptedInput> {
    vec![
        ScriptedInput::Wait(60),
        ScriptedInput::Press(KeyCode::KeyW),
        ScriptedInput::Wait(45),
        ScriptedInput::Press(KeyCode::ShiftLeft),
        ScriptedInput::Wait(30),
        ScriptedInput::Press(KeyCode::Space),
        ScriptedInput::Wait(1),
        ScriptedInput::Release(KeyCode::Space),
        ScriptedInput::Wait(40),
        ScriptedInput::Release(KeyCode::ShiftLeft),
        ScriptedInput::Release(KeyCode::KeyW),
        ScriptedInput::Wait(20),
        ScriptedInput::Look(0.0, 3000.0),
        ScriptedInput::Wait(1),
        ScriptedInput::Click(MouseButton::Left),
        ScriptedInput::Wait(5),
        ScriptedInput::Press(KeyCode::Digit3),
        ScriptedInput::Wait(1),
        ScriptedInput::Release(KeyCode::Digit3),
        ScriptedInput::Look(0.0, -2000.0),
        ScriptedInput::Wait(1),
        ScriptedInput::Click(MouseButton::Right),
        ScriptedInput::Wait(30),
    ]
}
