// Asset management system
//
// Finds asset files on disk and slices sprite sheets into atlas regions.

mod atlas;
mod loader;
mod sprite_sheet;

pub use atlas::{AtlasRegion, UvRect};
pub use loader::AssetLoader;
pub use sprite_sheet::SpriteSheet;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Cell size {cell_width}x{cell_height} does not fit a {width}x{height} sheet")]
    InvalidCellSize {
        cell_width: u32,
        cell_height: u32,
        width: u32,
        height: u32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
