// Input manager - turns keyboard events into held-action state

use super::action::{Action, InputSource};
use super::config::InputConfig;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Snapshot of the held keys the player controller reads each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    pub jump: bool,
    pub left: bool,
    pub right: bool,
}

/// Tracks which bound keys are held
pub struct InputManager {
    config: InputConfig,

    /// Sources currently held down. Actions are derived from these so two
    /// keys bound to one action release independently.
    held: HashSet<InputSource>,
}

impl InputManager {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            held: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only physical keys are bound
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        let source = InputSource::key(key_code);

        match event.state {
            ElementState::Pressed => {
                if !event.repeat {
                    self.press(source);
                }
            }
            ElementState::Released => self.release(source),
        }
    }

    pub(crate) fn press(&mut self, source: InputSource) {
        if self.config.get_action(source).is_some() {
            self.held.insert(source);
        }
    }

    pub(crate) fn release(&mut self, source: InputSource) {
        self.held.remove(&source);
    }

    /// Check if any source bound to an action is held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.held
            .iter()
            .any(|source| self.config.get_action(*source) == Some(action))
    }

    /// Held state of the movement keys
    pub fn controls(&self) -> ControlState {
        ControlState {
            jump: self.is_pressed(Action::Jump),
            left: self.is_pressed(Action::MoveLeft),
            right: self.is_pressed(Action::MoveRight),
        }
    }

    /// Release everything, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.held.clear();
    }

}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(InputConfig::with_defaults())
    }
}
