// Player system
//
// Everything the controllable character needs:
// - Jump models (charge-and-release, pump)
// - Cyclic walking animation
// - Visual state derived from physics
// - The ordered input rule table
// - The controller that ties them together each tick

pub mod animation;
pub mod controller;
pub mod jump;
pub mod rules;
pub mod state;

// Re-export what the scene and the app use
pub use controller::PlayerController;
pub use state::{Facing, SpriteId, VisualState};
