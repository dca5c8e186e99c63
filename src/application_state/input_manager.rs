//! # Input Manager
//!
//! This module handles input processing for the sandbox:
//! - Keyboard and mouse button state tracking
//! - Window event intake, or direct state injection for scripted runs
//! - Mouse delta accumulation between ticks

use std::collections::HashMap;

use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::{MouseInput, ProcessedInputState, RawInputState};

/// Keys the sandbox binds.
pub const KEY_CODES: [KeyCode; 10] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::ShiftLeft,
    KeyCode::Space,
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
];

/// Hotbar select keys, in slot order.
pub const HOTBAR_KEYS: [KeyCode; 4] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
];

const MOUSE_BUTTONS: [MouseButton; 2] = [MouseButton::Left, MouseButton::Right];

/// Manages the state of all input devices and processes input events.
///
/// Holds the down flag of every bound key and button for the previous and the
/// current tick, so each snapshot can classify edges.
#[derive(Debug)]
pub struct InputManager {
    /// Previous state of all tracked keyboard keys
    pub keyboard_inputs_old: HashMap<KeyCode, bool>,
    /// Current state of all tracked keyboard keys
    pub keyboard_inputs_new: HashMap<KeyCode, bool>,

    /// Current state of mouse inputs
    pub mouse_inputs: MouseInput,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Creates a new InputManager with every bound key and button released.
    pub fn new() -> Self {
        let keyboard_inputs_old: HashMap<KeyCode, bool> =
            KEY_CODES.iter().map(|key| (*key, false)).collect();
        let keyboard_inputs_new = keyboard_inputs_old.clone();

        let mouse_button_inputs_old: HashMap<MouseButton, bool> =
            MOUSE_BUTTONS.iter().map(|button| (*button, false)).collect();
        let mouse_button_inputs_new = mouse_button_inputs_old.clone();

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            mouse_inputs: MouseInput {
                mouse_button_inputs_old,
                mouse_button_inputs_new,
                mouse_delta: None,
            },
        }
    }

    /// Copies the current down flags into the previous ones.
    pub fn move_old_states(&mut self) {
        for (key, new_state) in self.keyboard_inputs_new.iter() {
            if let Some(old_state) = self.keyboard_inputs_old.get_mut(key) {
                *old_state = *new_state;
            }
        }

        for (button, new_state) in self.mouse_inputs.mouse_button_inputs_new.iter() {
            if let Some(old_state) = self.mouse_inputs.mouse_button_inputs_old.get_mut(button) {
                *old_state = *new_state;
            }
        }
    }

    /// Processes a window event and updates internal input state.
    ///
    /// # Arguments
    /// * `event` - The window event to process
    pub fn intake_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => {
                self.set_key_state(*key, *state == ElementState::Pressed);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                self.set_mouse_button_state(*button, *state == ElementState::Pressed);
            }
            _ => {}
        }
    }

    /// Sets the current down flag of a bound key. Unbound keys are ignored.
    pub fn set_key_state(&mut self, key: KeyCode, pressed: bool) {
        if let Some(key_state) = self.keyboard_inputs_new.get_mut(&key) {
            *key_state = pressed;
        }
    }

    /// Sets the current down flag of a bound mouse button.
    pub fn set_mouse_button_state(&mut self, button: MouseButton, pressed: bool) {
        if let Some(button_state) = self.mouse_inputs.mouse_button_inputs_new.get_mut(&button) {
            *button_state = pressed;
        }
    }

    /// Adds a mouse movement sample to this tick's delta.
    ///
    /// # Arguments
    /// * `delta` - The (x, y) delta of mouse movement since the last sample
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (x, y) = self.mouse_inputs.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_inputs.mouse_delta = Some((x + delta.0, y + delta.1));
    }

    /// Classifies the raw down flags into a [`ProcessedInputState`].
    pub fn create_processed_input_state(&self) -> ProcessedInputState {
        let keyboard_states = self
            .keyboard_inputs_new
            .iter()
            .map(|(key, &new_state)| {
                let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
                (*key, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        let mouse_button_states = self
            .mouse_inputs
            .mouse_button_inputs_new
            .iter()
            .map(|(button, &new_state)| {
                let old_state = self
                    .mouse_inputs
                    .mouse_button_inputs_old
                    .get(button)
                    .copied()
                    .unwrap_or(false);
                (*button, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            keyboard_states,
            mouse_button_states,
            mouse_delta: self.mouse_inputs.mouse_delta,
        }
    }

    /// Returns this tick's processed input and prepares for the next tick.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.reset_inputs();
        processed_input
    }

    /// Rolls the edge state forward and clears the accumulated mouse delta.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();
        self.mouse_inputs.mouse_delta = None;
    }

    /// Releases every key and button, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.keyboard_inputs_new.values_mut().for_each(|down| *down = false);
        self.mouse_inputs
            .mouse_button_inputs_new
            .values_mut()
            .for_each(|down| *down = false);
        self.mouse_inputs.mouse_delta = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_edges_across_ticks() {
        let mut input = InputManager::new();

        input.set_key_state(KeyCode::KeyW, true);
        let first = input.get_and_reset_processed_input();
        assert_eq!(first.get_key_state(KeyCode::KeyW), RawInputState::Pressed);

        let second = input.get_and_reset_processed_input();
        assert_eq!(second.get_key_state(KeyCode::KeyW), RawInputState::Held);

        input.set_key_state(KeyCode::KeyW, false);
        let third = input.get_and_reset_processed_input();
        assert_eq!(third.get_key_state(KeyCode::KeyW), RawInputState::Released);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut input = InputManager::new();
        input.set_key_state(KeyCode::KeyQ, true);
        let state = input.get_and_reset_processed_input();
        assert!(!state.keyboard_states.contains_key(&KeyCode::KeyQ));
    }

    #[test]
    fn mouse_delta_accumulates_and_resets() {
        let mut input = InputManager::new();
        input.intake_mouse_motion((1.0, 2.0));
        input.intake_mouse_motion((3.0, -1.0));

        let state = input.get_and_reset_processed_input();
        assert_eq!(state.get_mouse_delta(), Some((4.0, 1.0)));
        assert!(input.get_and_reset_processed_input().get_mouse_delta().is_none());
    }

    #[test]
    fn mouse_buttons_report_edges() {
        let mut input = InputManager::new();
        input.set_mouse_button_state(MouseButton::Right, true);
        let state = input.get_and_reset_processed_input();
        assert!(state
            .get_mouse_button_state(MouseButton::Right)
            .is_just_pressed());

        input.release_all();
        let state = input.get_and_reset_processed_input();
        assert!(state
            .get_mouse_button_state(MouseButton::Right)
            .is_just_released());
    }
}
