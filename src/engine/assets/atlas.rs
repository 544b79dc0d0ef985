// Atlas regions: rectangles within a texture and their UVs

/// Normalized texture coordinates of a rectangle, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub u_min: f32,
    pub v_min: f32,
    pub u_max: f32,
    pub v_max: f32,
}

impl UvRect {
    /// Mirror horizontally by swapping the u bounds
    pub fn flipped_x(self) -> Self {
        Self {
            u_min: self.u_max,
            u_max: self.u_min,
            ..self
        }
    }
}

/// A region within a texture atlas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasRegion {
    /// Position in the atlas (pixels)
    pub x: u32,
    pub y: u32,

    /// Size of the region (pixels)
    pub width: u32,
    pub height: u32,

    pub uv: UvRect,
}

impl AtlasRegion {
    /// Create a new atlas region with calculated UV coordinates
    pub fn new(x: u32, y: u32, width: u32, height: u32, atlas_width: u32, atlas_height: u32) -> Self {
        let uv = UvRect {
            u_min: x as f32 / atlas_width as f32,
            v_min: y as f32 / atlas_height as f32,
            u_max: (x + width) as f32 / atlas_width as f32,
            v_max: (y + height) as f32 / atlas_height as f32,
        };

        Self {
            x,
            y,
            width,
            height,
            uv,
        }
    }
}
