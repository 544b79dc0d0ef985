// Sprite sheet slicing

use super::{AssetError, AtlasRegion};
use image::{Rgba, RgbaImage};

/// Background color of the sheet, made transparent on load
const COLOR_KEY: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A grid of equally sized cells cut from one image.
///
/// The image itself stays whole (it is uploaded to the GPU as a single
/// texture); cells are addressed by `(row, col)` and exposed as atlas
/// regions.
pub struct SpriteSheet {
    image: RgbaImage,
    cell_width: u32,
    cell_height: u32,
    regions: Vec<Vec<AtlasRegion>>,
}

impl SpriteSheet {
    /// Decode an encoded image (PNG/JPEG) and slice it
    pub fn from_bytes(bytes: &[u8], cell_width: u32, cell_height: u32) -> Result<Self, AssetError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Self::from_image(image, cell_width, cell_height)
    }

    /// Slice an image into `cell_width x cell_height` cells. Partial cells on
    /// the right and bottom edges are ignored.
    pub fn from_image(
        mut image: RgbaImage,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<Self, AssetError> {
        let (width, height) = image.dimensions();
        if cell_width == 0 || cell_height == 0 || cell_width > width || cell_height > height {
            return Err(AssetError::InvalidCellSize {
                cell_width,
                cell_height,
                width,
                height,
            });
        }

        for pixel in image.pixels_mut() {
            if *pixel == COLOR_KEY {
                pixel.0[3] = 0;
            }
        }

        let cols = width / cell_width;
        let rows = height / cell_height;
        let regions = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| {
                        AtlasRegion::new(
                            col * cell_width,
                            row * cell_height,
                            cell_width,
                            cell_height,
                            width,
                            height,
                        )
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            image,
            cell_width,
            cell_height,
            regions,
        })
    }

    /// Get the region of one cell
    pub fn region(&self, row: usize, col: usize) -> Option<&AtlasRegion> {
        self.regions.get(row)?.get(col)
    }

    pub fn rows(&self) -> usize {
        self.regions.len()
    }

    pub fn cols(&self) -> usize {
        self.regions.first().map_or(0, Vec::len)
    }

    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// The color-keyed image, ready for upload
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}
