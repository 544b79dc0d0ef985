// Visual state of the player, derived from physics

/// Index of a frame in the first row of the character sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub usize);

/// What the player looks like this frame.
///
/// Never stored: always recomputed from velocity and jump state, so it
/// cannot drift out of sync with the physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualState {
    /// Standing on the floor
    Idle,
    /// Grounded, storing jump force
    Charging,
    /// Moving upward
    Jumping,
    /// Moving downward
    Falling,
}

impl VisualState {
    /// Pick the state from vertical velocity and queued jump force, in
    /// priority order: ascent, descent, charge, idle.
    pub fn derive(velocity_y: f32, queued_force: f32) -> Self {
        if velocity_y < 0.0 {
            Self::Jumping
        } else if velocity_y > 0.0 {
            Self::Falling
        } else if queued_force > 0.0 {
            Self::Charging
        } else {
            Self::Idle
        }
    }

    /// Sprite sheet column for this state
    pub fn sprite(&self) -> SpriteId {
        match self {
            Self::Idle => SpriteId(0),
            Self::Charging => SpriteId(2),
            Self::Jumping => SpriteId(3),
            Self::Falling => SpriteId(4),
        }
    }
}

/// Walking cycle frames, in playback order
pub const WALK_FRAMES: [SpriteId; 2] = [SpriteId(1), SpriteId(2)];

/// Direction the player last moved in. Rendering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Frame the renderer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerFrame {
    /// A single pose picked from the visual state
    Still(VisualState),
    /// Current frame of the walking cycle
    Walking(SpriteId),
}

impl PlayerFrame {
    pub fn sprite(&self) -> SpriteId {
        match self {
            Self::Still(state) => state.sprite(),
            Self::Walking(sprite) => *sprite,
        }
    }
}
