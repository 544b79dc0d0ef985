// Player controller: the per-tick physics and input update

use glam::Vec2;
use log::debug;

use super::animation::Animation;
use super::jump::JumpModel;
use super::rules::{self, InputRule};
use super::state::{Facing, PlayerFrame, SpriteId, VisualState, WALK_FRAMES};
use crate::core::math::clamp;
use crate::engine::input::ControlState;
use crate::game::config::{ConfigError, PlayerConfig, WorldConfig};

/// The single controllable entity.
///
/// Coordinates are screen space: `position` is the top-left corner of the
/// bounding box and y grows downward, so gravity is positive and a jump is a
/// negative vertical impulse.
#[derive(Debug, Clone)]
pub struct PlayerController {
    config: PlayerConfig,
    world: WorldConfig,
    position: Vec2,
    velocity: Vec2,
    jump: JumpModel,
    walking: bool,
    walking_animation: Animation<SpriteId>,
    facing: Facing,
}

impl PlayerController {
    /// Create a player standing in the middle of the floor
    pub fn new(config: PlayerConfig, world: WorldConfig) -> Result<Self, ConfigError> {
        world.validate()?;
        config.validate(&world)?;

        let jump = JumpModel::from_config(&config.jump)?;
        let walking_animation = Animation::new(WALK_FRAMES.to_vec(), config.walk_frame_rate)?;

        Ok(Self {
            position: Vec2::new(world.width / 2.0, world.floor - config.height),
            velocity: Vec2::ZERO,
            config,
            world,
            jump,
            walking: false,
            walking_animation,
            facing: Facing::default(),
        })
    }

    /// Advance the simulation by `dt` seconds with the given held keys.
    ///
    /// Step order matters: collision and wrapping correct the integration,
    /// and input reads the corrected state.
    pub fn update(&mut self, dt: f32, controls: ControlState) {
        self.position += self.velocity * dt;

        if !self.is_grounded() {
            self.velocity.y += self
                .config
                .gravity_model
                .increment(self.config.gravity, dt);
        }

        self.velocity.y = clamp(
            self.velocity.y,
            -self.jump.max_upward_speed(),
            self.config.terminal_velocity,
        );

        self.resolve_floor();
        if self.is_grounded() {
            self.jump.on_ground();
        }

        if self.config.wraparound {
            self.wrap_horizontal();
        }

        self.apply_input(controls);
        self.update_walking();

        // A held jump key cancels lateral motion, as does releasing both directions
        if controls.jump || !(controls.left || controls.right) {
            self.velocity.x = 0.0;
        }

        if self.walking {
            self.walking_animation.update(dt);
        }
    }

    fn resolve_floor(&mut self) {
        if self.bottom() > self.world.floor {
            self.velocity.y = 0.0;
            self.position.y = self.world.floor - self.config.height;
        }
    }

    fn wrap_horizontal(&mut self) {
        let half_width = self.config.width / 2.0;
        if self.position.x > self.world.width - half_width {
            self.position.x = -half_width;
        }
        if self.position.x + self.config.width < -half_width {
            self.position.x = self.world.width - half_width;
        }
    }

    fn apply_input(&mut self, controls: ControlState) {
        let Some(rule) = rules::resolve(controls, self.jump.queued_force()) else {
            return;
        };

        match rule {
            InputRule::HoldJump => {
                let impulse = self.jump.hold(self.is_grounded(), self.velocity.y);
                self.velocity.y -= impulse;
            }
            InputRule::ReleaseJump => {
                let force = self.jump.release();
                self.velocity.y -= force;
                debug!("Jump released with force {}", force);
            }
            InputRule::MoveLeft => {
                self.velocity.x = -self.horizontal_speed();
                self.facing = Facing::Left;
            }
            InputRule::MoveRight => {
                self.velocity.x = self.horizontal_speed();
                self.facing = Facing::Right;
            }
        }
    }

    /// Full speed on the ground, reduced while moving vertically
    fn horizontal_speed(&self) -> f32 {
        if self.velocity.y == 0.0 {
            self.config.speed
        } else {
            self.config.speed * self.config.air_control
        }
    }

    fn update_walking(&mut self) {
        if self.velocity.x != 0.0 && self.velocity.y == 0.0 && !self.walking {
            self.walking_animation.enter();
            self.walking = true;
            debug!("Started walking");
        }

        if (self.velocity.y != 0.0 && self.walking) || self.velocity.x == 0.0 {
            if self.walking {
                debug!("Stopped walking");
            }
            self.walking = false;
            self.walking_animation.exit();
        }
    }

    fn bottom(&self) -> f32 {
        self.position.y + self.config.height
    }

    /// Bottom edge exactly on the floor line. Landing snaps to the line, so
    /// a player just above it is still airborne and keeps falling.
    pub fn is_grounded(&self) -> bool {
        self.bottom() == self.world.floor
    }

    /// Pose derived from the current physics state
    pub fn visual_state(&self) -> VisualState {
        VisualState::derive(self.velocity.y, self.jump.queued_force())
    }

    /// Frame to draw: the walking cycle while walking, the pose otherwise
    pub fn frame(&self) -> PlayerFrame {
        if self.walking {
            PlayerFrame::Walking(self.walking_animation.current_frame())
        } else {
            PlayerFrame::Still(self.visual_state())
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Bounding box as top-left corner and size
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (
            self.position,
            Vec2::new(self.config.width, self.config.height),
        )
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_walking(&self) -> bool {
        self.walking
    }

    pub fn jump(&self) -> &JumpModel {
        &self.jump
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::{GravityModel, JumpConfig, DEFAULT_PLAYER, DEFAULT_WORLD};
    use approx::assert_relative_eq;

    const TICK: f32 = 1.0 / 60.0;

    const NONE: ControlState = ControlState {
        jump: false,
        left: false,
        right: false,
    };
    const JUMP: ControlState = ControlState {
        jump: true,
        left: false,
        right: false,
    };
    const LEFT: ControlState = ControlState {
        jump: false,
        left: true,
        right: false,
    };
    const RIGHT: ControlState = ControlState {
        jump: false,
        left: false,
        right: true,
    };

    fn player() -> PlayerController {
        PlayerController::new(DEFAULT_PLAYER, DEFAULT_WORLD).unwrap()
    }

    fn airborne(y: f32, velocity_y: f32) -> PlayerController {
        let mut p = player();
        p.position.y = y;
        p.velocity.y = velocity_y;
        p
    }

    #[test]
    fn test_spawns_on_floor() {
        let p = player();
        assert_eq!(p.position(), Vec2::new(640.0, 556.0));
        assert_eq!(p.velocity(), Vec2::ZERO);
        assert!(p.is_grounded());
        assert_eq!(p.visual_state(), VisualState::Idle);
        assert_eq!(p.facing(), Facing::Right);
    }

    #[test]
    fn test_bounds_follow_position() {
        let mut p = player();
        assert_eq!(
            p.bounds(),
            (Vec2::new(640.0, 556.0), Vec2::new(32.0, 64.0))
        );

        p.update(0.5, LEFT);
        p.update(0.5, LEFT);
        let (top_left, size) = p.bounds();
        assert_eq!(top_left, p.position());
        assert_eq!(top_left.x, 490.0);
        assert_eq!(size, Vec2::new(32.0, 64.0));
    }

    #[test]
    fn test_just_above_floor_is_airborne() {
        // Bottom edge a hair above the floor line
        let mut p = airborne(555.9995, 100.0);
        assert!(!p.is_grounded());

        p.update(0.0, NONE);
        assert_eq!(p.velocity().y, 150.0);
        assert_eq!(p.visual_state(), VisualState::Falling);

        p.update(0.0, JUMP);
        assert_eq!(p.jump().queued_force(), 0.0);
        assert_eq!(p.velocity().y, 200.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PlayerConfig {
            jump: JumpConfig::Chargeable {
                initial_force: 900.0,
                max_force: 100.0,
                step: 50.0,
            },
            ..DEFAULT_PLAYER
        };
        assert!(matches!(
            PlayerController::new(config, DEFAULT_WORLD),
            Err(ConfigError::JumpForceRange { .. })
        ));
    }

    #[test]
    fn test_grounded_idle_is_stable() {
        let mut p = player();
        for _ in 0..10 {
            p.update(TICK, NONE);
        }
        assert_eq!(p.position(), Vec2::new(640.0, 556.0));
        assert_eq!(p.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_gravity_applied_while_airborne() {
        let mut p = airborne(100.0, 0.0);
        p.update(TICK, NONE);
        assert_eq!(p.velocity().y, 50.0);
        p.update(TICK, NONE);
        assert_eq!(p.velocity().y, 100.0);
        assert_eq!(p.visual_state(), VisualState::Falling);
    }

    #[test]
    fn test_terminal_velocity() {
        let mut p = airborne(100.0, 680.0);
        p.update(TICK, NONE);
        assert_eq!(p.velocity().y, 700.0);
        p.update(TICK, NONE);
        assert_eq!(p.velocity().y, 700.0);
    }

    #[test]
    fn test_upward_speed_clamped_to_max_force() {
        let mut p = airborne(100.0, -2500.0);
        p.update(TICK, NONE);
        assert_eq!(p.velocity().y, -1800.0);
    }

    #[test]
    fn test_floor_collision_snaps() {
        let mut p = airborne(600.0, 200.0);
        p.update(TICK, NONE);
        assert_eq!(p.position().y + 64.0, 620.0);
        assert_eq!(p.velocity().y, 0.0);
    }

    #[test]
    fn test_fast_fall_through_floor_snaps() {
        let mut p = airborne(550.0, 700.0);
        p.update(TICK, NONE);
        assert_eq!(p.position().y, 556.0);
        assert_eq!(p.velocity().y, 0.0);
        assert!(p.is_grounded());
    }

    #[test]
    fn test_wrap_right_edge() {
        let mut p = player();
        p.position.x = 1270.0;
        p.update(TICK, NONE);
        assert_eq!(p.position().x, -16.0);
    }

    #[test]
    fn test_wrap_left_edge() {
        let mut p = player();
        p.position.x = -50.0;
        p.update(TICK, NONE);
        assert_eq!(p.position().x, 1264.0);
    }

    #[test]
    fn test_no_wrap_when_disabled() {
        let config = PlayerConfig {
            wraparound: false,
            ..DEFAULT_PLAYER
        };
        let mut p = PlayerController::new(config, DEFAULT_WORLD).unwrap();
        p.position.x = 1270.0;
        p.update(TICK, NONE);
        assert_eq!(p.position().x, 1270.0);
    }

    #[test]
    fn test_charge_then_release() {
        let mut p = player();
        for _ in 0..3 {
            p.update(TICK, JUMP);
        }
        assert_eq!(p.jump().queued_force(), 1000.0);
        assert_eq!(p.visual_state(), VisualState::Charging);
        assert_eq!(p.velocity().y, 0.0);

        p.update(TICK, NONE);
        assert_eq!(p.velocity().y, -1000.0);
        assert_eq!(p.jump().queued_force(), 0.0);
        assert_eq!(p.visual_state(), VisualState::Jumping);

        // Leaves the floor on the next tick and starts decelerating
        p.update(TICK, NONE);
        assert!(!p.is_grounded());
        assert_eq!(p.velocity().y, -950.0);
    }

    #[test]
    fn test_release_fires_even_with_direction_held() {
        let mut p = player();
        p.update(TICK, JUMP);
        p.update(TICK, LEFT);
        assert_eq!(p.velocity().y, -900.0);
        assert_eq!(p.velocity().x, 0.0);
        assert_eq!(p.facing(), Facing::Right);
    }

    #[test]
    fn test_full_jump_arc_lands() {
        let mut p = player();
        p.update(TICK, JUMP);
        p.update(TICK, NONE);

        let mut saw_falling = false;
        for _ in 0..200 {
            p.update(TICK, NONE);
            saw_falling |= p.visual_state() == VisualState::Falling;
            assert!(p.position().y + 64.0 <= 620.0);
        }
        assert!(saw_falling);
        assert!(p.is_grounded());
        assert_eq!(p.visual_state(), VisualState::Idle);
    }

    #[test]
    fn test_no_charge_while_airborne() {
        let mut p = airborne(100.0, 0.0);
        p.update(TICK, JUMP);
        assert_eq!(p.jump().queued_force(), 0.0);
    }

    #[test]
    fn test_walk_left_grounded() {
        let mut p = player();
        p.update(TICK, LEFT);
        assert_eq!(p.velocity().x, -300.0);
        assert_eq!(p.facing(), Facing::Left);
        assert!(p.is_walking());
    }

    #[test]
    fn test_walk_left_airborne_is_halved() {
        let mut p = airborne(100.0, 100.0);
        p.update(TICK, LEFT);
        assert_eq!(p.velocity().x, -150.0);
        assert!(!p.is_walking());
    }

    #[test]
    fn test_walk_right_grounded_and_airborne() {
        let mut p = player();
        p.update(TICK, RIGHT);
        assert_eq!(p.velocity().x, 300.0);

        let mut p = airborne(100.0, 100.0);
        p.update(TICK, RIGHT);
        assert_eq!(p.velocity().x, 150.0);
    }

    #[test]
    fn test_left_wins_over_right() {
        let mut p = player();
        p.update(
            TICK,
            ControlState {
                jump: false,
                left: true,
                right: true,
            },
        );
        assert_eq!(p.velocity().x, -300.0);
        assert_eq!(p.facing(), Facing::Left);
    }

    #[test]
    fn test_jump_suppresses_horizontal() {
        let mut p = player();
        p.update(TICK, LEFT);
        p.update(
            TICK,
            ControlState {
                jump: true,
                left: true,
                right: false,
            },
        );
        assert_eq!(p.velocity().x, 0.0);
        assert_eq!(p.jump().queued_force(), 900.0);
    }

    #[test]
    fn test_releasing_direction_stops() {
        let mut p = player();
        p.update(TICK, RIGHT);
        p.update(TICK, NONE);
        assert_eq!(p.velocity().x, 0.0);
    }

    #[test]
    fn test_moves_with_one_tick_lag() {
        let mut p = player();
        p.update(0.5, RIGHT);
        assert_eq!(p.position().x, 640.0);
        p.update(0.5, RIGHT);
        assert_eq!(p.position().x, 790.0);
    }

    #[test]
    fn test_walking_animation_cycles() {
        let mut p = player();
        p.update(0.25, RIGHT);
        assert_eq!(p.frame(), PlayerFrame::Walking(SpriteId(2)));
        p.update(0.25, RIGHT);
        assert_eq!(p.frame(), PlayerFrame::Walking(SpriteId(1)));
    }

    #[test]
    fn test_walking_stops_after_release() {
        let mut p = player();
        p.update(TICK, RIGHT);
        assert!(p.is_walking());

        // Velocity is still set when the edge detector runs on the release tick
        p.update(TICK, NONE);
        assert!(p.is_walking());

        p.update(TICK, NONE);
        assert!(!p.is_walking());
        assert_eq!(p.frame(), PlayerFrame::Still(VisualState::Idle));
    }

    #[test]
    fn test_walking_stops_when_airborne() {
        let mut p = player();
        p.update(TICK, RIGHT);
        assert!(p.is_walking());

        p.velocity.y = -300.0;
        p.update(TICK, RIGHT);
        assert!(!p.is_walking());
        assert_eq!(p.frame(), PlayerFrame::Still(VisualState::Jumping));
    }

    #[test]
    fn test_facing_persists() {
        let mut p = player();
        p.update(TICK, LEFT);
        p.update(TICK, NONE);
        p.update(TICK, NONE);
        assert_eq!(p.facing(), Facing::Left);
        p.update(TICK, RIGHT);
        assert_eq!(p.facing(), Facing::Right);
    }

    #[test]
    fn test_pump_jump_model() {
        let config = PlayerConfig {
            jump: JumpConfig::Pump {
                jump_force: 600.0,
                pump_force: 40.0,
                max_pumps: 2,
            },
            ..DEFAULT_PLAYER
        };
        let mut p = PlayerController::new(config, DEFAULT_WORLD).unwrap();

        p.update(TICK, JUMP);
        assert_eq!(p.velocity().y, -600.0);
        assert_eq!(p.visual_state(), VisualState::Jumping);

        p.update(TICK, JUMP);
        assert_eq!(p.velocity().y, -590.0);
        p.update(TICK, JUMP);
        assert_eq!(p.velocity().y, -580.0);
        p.update(TICK, JUMP);
        assert_eq!(p.velocity().y, -530.0);
    }

    #[test]
    fn test_scaled_gravity_model() {
        let config = PlayerConfig {
            gravity_model: GravityModel::Scaled,
            ..DEFAULT_PLAYER
        };
        let mut p = PlayerController::new(config, DEFAULT_WORLD).unwrap();
        p.position.y = 100.0;
        p.update(1.0 / 30.0, NONE);
        assert_relative_eq!(p.velocity().y, 100.0, epsilon = 1e-3);
    }
}
