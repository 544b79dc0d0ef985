// Input resolution table
//
// One rule fires per tick. Rules are tried in table order and the first
// whose guard matches wins; later rules assume the earlier guards failed.

use crate::engine::input::ControlState;

/// A guarded reaction to held input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRule {
    /// Jump held: charge (or pump). Consumes the tick even while airborne.
    HoldJump,
    /// Jump not held but force is queued: fire the jump
    ReleaseJump,
    MoveLeft,
    MoveRight,
}

/// Evaluation order
pub const INPUT_RULES: [InputRule; 4] = [
    InputRule::HoldJump,
    InputRule::ReleaseJump,
    InputRule::MoveLeft,
    InputRule::MoveRight,
];

impl InputRule {
    /// Guard of this rule, ignoring every rule before it
    pub fn matches(&self, controls: ControlState, queued_force: f32) -> bool {
        match self {
            Self::HoldJump => controls.jump,
            Self::ReleaseJump => queued_force > 0.0,
            Self::MoveLeft => controls.left,
            Self::MoveRight => controls.right,
        }
    }
}

/// First rule in [`INPUT_RULES`] that matches, if any
pub fn resolve(controls: ControlState, queued_force: f32) -> Option<InputRule> {
    INPUT_RULES
        .iter()
        .copied()
        .find(|rule| rule.matches(controls, queued_force))
}
