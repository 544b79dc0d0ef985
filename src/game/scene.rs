// Turns the world and the player into draw commands

use glam::{Vec2, Vec4};

use crate::engine::assets::{SpriteSheet, UvRect};
use crate::engine::renderer::{srgb, DrawCommand};
use crate::game::config::WorldConfig;
use crate::game::player::{Facing, PlayerController, SpriteId, VisualState};

/// Character sprites are drawn at this multiple of their cell size
pub const SPRITE_SCALE: f32 = 4.0;

/// Source of character frames for the scene
pub trait SpriteProvider {
    /// UV rectangle of a frame, if the sheet has it
    fn frame(&self, id: SpriteId) -> Option<UvRect>;

    /// On-screen size of one frame
    fn frame_size(&self) -> Vec2;
}

impl SpriteProvider for SpriteSheet {
    fn frame(&self, id: SpriteId) -> Option<UvRect> {
        self.region(0, id.0).map(|region| region.uv)
    }

    fn frame_size(&self) -> Vec2 {
        Vec2::new(self.cell_width() as f32, self.cell_height() as f32) * SPRITE_SCALE
    }
}

/// Builds the per-frame draw list
pub struct Scene;

impl Scene {
    /// Player first, then the floor
    pub fn draw_commands<S: SpriteProvider>(
        world: &WorldConfig,
        player: &PlayerController,
        sprites: Option<&S>,
    ) -> Vec<DrawCommand> {
        let (top_left, hitbox) = player.bounds();
        let player_command = sprites
            .and_then(|sheet| {
                sheet
                    .frame(player.frame().sprite())
                    .map(|uv| DrawCommand::Sprite {
                        position: top_left,
                        size: sheet.frame_size(),
                        uv,
                        // Sheet art faces left
                        flip_x: player.facing() == Facing::Right,
                    })
            })
            .unwrap_or_else(|| DrawCommand::Rect {
                position: top_left,
                size: hitbox,
                color: state_color(player.visual_state()),
            });

        vec![
            player_command,
            DrawCommand::Rect {
                position: Vec2::new(0.0, world.floor),
                size: Vec2::new(world.width, world.height - world.floor),
                color: floor_color(),
            },
        ]
    }
}

pub fn floor_color() -> Vec4 {
    srgb(190, 190, 190)
}

/// Placeholder color of the player when no sheet is loaded
pub fn state_color(state: VisualState) -> Vec4 {
    match state {
        VisualState::Idle => srgb(230, 230, 230),
        VisualState::Charging => srgb(240, 200, 40),
        VisualState::Jumping => srgb(80, 200, 120),
        VisualState::Falling => srgb(220, 80, 80),
    }
}
