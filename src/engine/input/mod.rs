// Input handling system
//
// Keyboard events come in through `InputManager::process_keyboard_event`;
// the simulation only ever sees a `ControlState` snapshot of held keys.
//
// - `action`: game actions and default key bindings
// - `config`: binding table with remapping
// - `manager`: held-key tracking and the per-tick snapshot

pub mod action;
pub mod config;
pub mod manager;

pub use action::Action;
pub use manager::{ControlState, InputManager};
