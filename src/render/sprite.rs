use std::path::Path;

use image::{RgbImage, RgbaImage};

use crate::error::AssetLoadError;
use crate::game::Point;

/// The food image, kept with its alpha channel
#[derive(Debug, Clone)]
pub struct FoodSprite {
    image: RgbaImage,
}

impl FoodSprite {
    /// Load and decode the sprite from disk
    pub fn load(path: &Path) -> Result<Self, AssetLoadError> {
        let image = image::open(path)
            .map_err(|source| AssetLoadError {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        Ok(Self { image })
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Alpha-blend the sprite onto `frame`, clipping whatever falls outside
    pub fn blend_onto(&self, frame: &mut RgbImage, top_left: Point) {
        let (frame_w, frame_h) = (frame.width() as i64, frame.height() as i64);

        for (sx, sy, src) in self.image.enumerate_pixels() {
            let x = i64::from(top_left.x) + i64::from(sx);
            let y = i64::from(top_left.y) + i64::from(sy);
            if x < 0 || y < 0 || x >= frame_w || y >= frame_h {
                continue;
            }

            let alpha = u16::from(src[3]);
            if alpha == 0 {
                continue;
            }
            let dst = frame.get_pixel_mut(x as u32, y as u32);
            for c in 0..3 {
                let blended =
                    (u16::from(src[c]) * alpha + u16::from(dst[c]) * (255 - alpha) + 127) / 255;
                dst[c] = blended as u8;
            }
        }
    }
}
