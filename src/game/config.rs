// Playfield and player tuning
//
// Everything here is a compile-time preset, validated once at startup.

use std::time::Duration;

use crate::core::math::is_positive;

/// Configuration errors. Construction of any game object fails fast with one
/// of these instead of producing undefined numeric behavior later.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("initial jump force must be positive, got {0}")]
    NonPositiveJumpForce(f32),

    #[error("max jump force {max} is below the initial force {initial}")]
    JumpForceRange { initial: f32, max: f32 },

    #[error("jump charge step must be finite and non-negative, got {0}")]
    InvalidChargeStep(f32),

    #[error("pump force must be finite and non-negative, got {0}")]
    InvalidPumpForce(f32),

    #[error("animation frame rate must be greater than zero")]
    ZeroFrameRate,

    #[error("animation needs at least one frame")]
    NoFrames,

    #[error("{name} must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("air control must lie in [0, 1], got {0}")]
    AirControlRange(f32),

    #[error("floor {floor} must lie inside the playfield height {height}")]
    FloorOutOfBounds { floor: f32, height: f32 },

    #[error("player height {player} does not fit above the floor {floor}")]
    PlayerTooTall { player: f32, floor: f32 },
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if is_positive(value) {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

/// The playfield: a screen-sized box with a single floor line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// Playfield width, also the wraparound span
    pub width: f32,
    /// Playfield height
    pub height: f32,
    /// Y coordinate of the floor line (y grows downward)
    pub floor: f32,
}

pub const DEFAULT_WORLD: WorldConfig = WorldConfig {
    width: 1280.0,
    height: 720.0,
    floor: 720.0 - 100.0,
};

impl Default for WorldConfig {
    fn default() -> Self {
        DEFAULT_WORLD
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world width", self.width)?;
        positive("world height", self.height)?;
        if !(self.floor.is_finite() && self.floor > 0.0 && self.floor <= self.height) {
            return Err(ConfigError::FloorOutOfBounds {
                floor: self.floor,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// How gravity is added to vertical velocity each update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravityModel {
    /// A constant increment per update, independent of `dt`
    #[default]
    PerTick,
    /// The per-tick constant rescaled by `dt` against a 60 Hz reference
    Scaled,
}

/// Reference update rate the per-tick gravity constant was tuned for
pub const GRAVITY_REFERENCE_RATE: f32 = 60.0;

impl GravityModel {
    /// Velocity increment for one update of length `dt`
    pub fn increment(&self, gravity: f32, dt: f32) -> f32 {
        match self {
            Self::PerTick => gravity,
            Self::Scaled => gravity * dt * GRAVITY_REFERENCE_RATE,
        }
    }
}

/// Which jump model a player uses. Exactly one per system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpConfig {
    /// Charge while grounded, release on key-up
    Chargeable {
        initial_force: f32,
        max_force: f32,
        step: f32,
    },
    /// Fixed take-off impulse plus extra impulses while held and ascending.
    /// `max_pumps == 0` is a plain fixed-height jump.
    Pump {
        jump_force: f32,
        pump_force: f32,
        max_pumps: u32,
    },
}

pub const DEFAULT_JUMP: JumpConfig = JumpConfig::Chargeable {
    initial_force: 900.0,
    max_force: 1800.0,
    step: 50.0,
};

impl Default for JumpConfig {
    fn default() -> Self {
        DEFAULT_JUMP
    }
}

/// Player tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerConfig {
    /// Bounding box width
    pub width: f32,
    /// Bounding box height
    pub height: f32,
    /// Horizontal speed on the ground (units/second)
    pub speed: f32,
    /// Fraction of `speed` available while airborne
    pub air_control: f32,
    /// Gravity constant, see [`GravityModel`]
    pub gravity: f32,
    pub gravity_model: GravityModel,
    /// Maximum downward speed
    pub terminal_velocity: f32,
    /// Wrap around the playfield edges horizontally
    pub wraparound: bool,
    /// Time each walking frame stays on screen
    pub walk_frame_rate: Duration,
    pub jump: JumpConfig,
}

pub const DEFAULT_PLAYER: PlayerConfig = PlayerConfig {
    width: 32.0,
    height: 64.0,
    speed: 300.0,
    air_control: 0.5,
    gravity: 50.0,
    gravity_model: GravityModel::PerTick,
    terminal_velocity: 700.0,
    wraparound: true,
    walk_frame_rate: Duration::from_millis(250),
    jump: DEFAULT_JUMP,
};

impl Default for PlayerConfig {
    fn default() -> Self {
        DEFAULT_PLAYER
    }
}

impl PlayerConfig {
    /// Validate against the world the player will live in
    pub fn validate(&self, world: &WorldConfig) -> Result<(), ConfigError> {
        positive("player width", self.width)?;
        positive("player height", self.height)?;
        positive("player speed", self.speed)?;
        positive("gravity", self.gravity)?;
        positive("terminal velocity", self.terminal_velocity)?;
        if !(0.0..=1.0).contains(&self.air_control) {
            return Err(ConfigError::AirControlRange(self.air_control));
        }
        if self.walk_frame_rate.is_zero() {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.height > world.floor {
            return Err(ConfigError::PlayerTooTall {
                player: self.height,
                floor: world.floor,
            });
        }
        Ok(())
    }
}
