// Draw commands and their conversion into quad geometry

use glam::{Vec2, Vec4};

use super::vertex::{Vertex, UNTEXTURED};
use crate::engine::assets::UvRect;

/// One thing to draw this frame, in playfield coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Solid rectangle
    Rect {
        position: Vec2,
        size: Vec2,
        color: Vec4,
    },
    /// Region of the sprite texture stretched over a rectangle
    Sprite {
        position: Vec2,
        size: Vec2,
        uv: UvRect,
        flip_x: bool,
    },
}

/// Convert an sRGB byte color to the linear color the shader expects
pub fn srgb(r: u8, g: u8, b: u8) -> Vec4 {
    fn to_linear(c: u8) -> f32 {
        let c = c as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    Vec4::new(to_linear(r), to_linear(g), to_linear(b), 1.0)
}

/// Indexed quad geometry for one frame, in command order
#[derive(Debug, Default)]
pub struct QuadBatch {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl QuadBatch {
    pub fn from_commands(commands: &[DrawCommand]) -> Self {
        let mut batch = Self {
            vertices: Vec::with_capacity(commands.len() * 4),
            indices: Vec::with_capacity(commands.len() * 6),
        };
        for command in commands {
            batch.push(command);
        }
        batch
    }

    fn push(&mut self, command: &DrawCommand) {
        let (position, size, uv, color) = match *command {
            DrawCommand::Rect {
                position,
                size,
                color,
            } => (position, size, None, color),
            DrawCommand::Sprite {
                position,
                size,
                uv,
                flip_x,
            } => {
                let uv = if flip_x { uv.flipped_x() } else { uv };
                (position, size, Some(uv), Vec4::ONE)
            }
        };

        let [top_left, top_right, bottom_right, bottom_left] = match uv {
            Some(uv) => [
                Vec2::new(uv.u_min, uv.v_min),
                Vec2::new(uv.u_max, uv.v_min),
                Vec2::new(uv.u_max, uv.v_max),
                Vec2::new(uv.u_min, uv.v_max),
            ],
            None => [UNTEXTURED; 4],
        };

        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&[
            Vertex::new(position, top_left, color),
            Vertex::new(position + Vec2::new(size.x, 0.0), top_right, color),
            Vertex::new(position + size, bottom_right, color),
            Vertex::new(position + Vec2::new(0.0, size.y), bottom_left, color),
        ]);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
