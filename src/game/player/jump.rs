// Jump models
//
// A player owns exactly one `JumpModel`. The chargeable model stores force
// while the key is held and hands it back on release; the pump model applies
// impulses immediately while the key is held.

use log::debug;

use crate::core::math::clamp;
use crate::game::config::{ConfigError, JumpConfig};

/// Charge-then-release jump.
///
/// Idle while `queued_force == 0`, charging otherwise. The first `charge()`
/// loads `initial_force`, every further call adds `step`, capped at
/// `max_force`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeableJump {
    initial_force: f32,
    max_force: f32,
    step: f32,
    queued_force: f32,
    max_force_reached: bool,
}

impl ChargeableJump {
    pub fn new(initial_force: f32, max_force: f32, step: f32) -> Result<Self, ConfigError> {
        if !(initial_force.is_finite() && initial_force > 0.0) {
            return Err(ConfigError::NonPositiveJumpForce(initial_force));
        }
        if !max_force.is_finite() || max_force < initial_force {
            return Err(ConfigError::JumpForceRange {
                initial: initial_force,
                max: max_force,
            });
        }
        if !(step.is_finite() && step >= 0.0) {
            return Err(ConfigError::InvalidChargeStep(step));
        }

        Ok(Self {
            initial_force,
            max_force,
            step,
            queued_force: 0.0,
            max_force_reached: false,
        })
    }

    /// Add one tick of charge
    pub fn charge(&mut self) {
        if self.is_charging() {
            self.queued_force = clamp(
                self.queued_force + self.step,
                self.initial_force,
                self.max_force,
            );
        } else {
            self.queued_force = self.initial_force;
        }

        if !self.is_fully_charged() && self.queued_force >= self.max_force {
            self.max_force_reached = true;
            debug!("Jump fully charged ({})", self.max_force);
        }
    }

    /// Force stored so far, 0 when idle
    pub fn jump_force(&self) -> f32 {
        self.queued_force
    }

    /// Drop any stored force
    pub fn reset(&mut self) {
        self.queued_force = 0.0;
        self.max_force_reached = false;
    }

    /// Take the stored force and return to idle
    pub fn release(&mut self) -> f32 {
        let force = self.queued_force;
        self.reset();
        force
    }

    pub fn is_charging(&self) -> bool {
        self.queued_force > 0.0
    }

    pub fn is_fully_charged(&self) -> bool {
        self.max_force_reached
    }

    pub fn max_force(&self) -> f32 {
        self.max_force
    }
}

/// Fixed take-off plus a limited number of mid-air boosts.
#[derive(Debug, Clone, PartialEq)]
pub struct PumpJump {
    jump_force: f32,
    pump_force: f32,
    max_pumps: u32,
    pumps_used: u32,
}

impl PumpJump {
    pub fn new(jump_force: f32, pump_force: f32, max_pumps: u32) -> Result<Self, ConfigError> {
        if !(jump_force.is_finite() && jump_force > 0.0) {
            return Err(ConfigError::NonPositiveJumpForce(jump_force));
        }
        if !(pump_force.is_finite() && pump_force >= 0.0) {
            return Err(ConfigError::InvalidPumpForce(pump_force));
        }

        Ok(Self {
            jump_force,
            pump_force,
            max_pumps,
            pumps_used: 0,
        })
    }

    /// Upward impulse for one tick with the jump key held
    pub fn press(&mut self, grounded: bool, velocity_y: f32) -> f32 {
        if grounded {
            self.pumps_used = 0;
            self.jump_force
        } else if velocity_y < 0.0 && self.pumps_used < self.max_pumps {
            self.pumps_used += 1;
            self.pump_force
        } else {
            0.0
        }
    }

    /// Refill the pump counter
    pub fn land(&mut self) {
        self.pumps_used = 0;
    }

    /// Fastest possible ascent: take-off plus every pump
    pub fn max_upward_speed(&self) -> f32 {
        self.jump_force + self.pump_force * self.max_pumps as f32
    }
}

/// The jump model a player was configured with
#[derive(Debug, Clone, PartialEq)]
pub enum JumpModel {
    Chargeable(ChargeableJump),
    Pump(PumpJump),
}

impl JumpModel {
    pub fn from_config(config: &JumpConfig) -> Result<Self, ConfigError> {
        match *config {
            JumpConfig::Chargeable {
                initial_force,
                max_force,
                step,
            } => ChargeableJump::new(initial_force, max_force, step).map(Self::Chargeable),
            JumpConfig::Pump {
                jump_force,
                pump_force,
                max_pumps,
            } => PumpJump::new(jump_force, pump_force, max_pumps).map(Self::Pump),
        }
    }

    /// Jump key held this tick. Returns an upward impulse to apply now.
    pub fn hold(&mut self, grounded: bool, velocity_y: f32) -> f32 {
        match self {
            Self::Chargeable(jump) => {
                if grounded {
                    jump.charge();
                }
                0.0
            }
            Self::Pump(jump) => jump.press(grounded, velocity_y),
        }
    }

    /// Force waiting for the release edge
    pub fn queued_force(&self) -> f32 {
        match self {
            Self::Chargeable(jump) => jump.jump_force(),
            Self::Pump(_) => 0.0,
        }
    }

    /// Jump key released with force queued. Returns the impulse to apply.
    pub fn release(&mut self) -> f32 {
        match self {
            Self::Chargeable(jump) => jump.release(),
            Self::Pump(_) => 0.0,
        }
    }

    /// Called every tick the player stands on the floor
    pub fn on_ground(&mut self) {
        if let Self::Pump(jump) = self {
            jump.land();
        }
    }

    /// Upper bound on upward speed, used to clamp vertical velocity
    pub fn max_upward_speed(&self) -> f32 {
        match self {
            Self::Chargeable(jump) => jump.max_force(),
            Self::Pump(jump) => jump.max_upward_speed(),
        }
    }
}
