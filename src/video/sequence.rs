use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{imageops, Rgb, RgbImage};
use tracing::info;

use super::FrameSource;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Frames read from a directory of images, in file name order
pub struct ImageSequence {
    paths: VecDeque<PathBuf>,
    mirror: bool,
}

impl ImageSequence {
    pub fn open(dir: &Path, mirror: bool) -> Result<Self> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read frame directory: {:?}", dir))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            })
            .collect();
        paths.sort();

        info!(frames = paths.len(), "Opened image sequence {:?}", dir);

        Ok(Self {
            paths: paths.into(),
            mirror,
        })
    }

    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

impl FrameSource for ImageSequence {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        let Some(path) = self.paths.pop_front() else {
            return Ok(None);
        };
        let mut frame = image::open(&path)
            .with_context(|| format!("Failed to decode frame: {:?}", path))?
            .to_rgb8();
        if self.mirror {
            imageops::flip_horizontal_in_place(&mut frame);
        }
        Ok(Some(frame))
    }
}

/// A fixed number of solid-colour frames
pub struct BlankFrames {
    template: RgbImage,
    remaining: usize,
}

impl BlankFrames {
    pub fn new(width: u32, height: u32, count: usize) -> Self {
        Self {
            template: RgbImage::from_pixel(width, height, Rgb([24, 24, 24])),
            remaining: count,
        }
    }
}

impl FrameSource for BlankFrames {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        Ok(Some(self.template.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_frames_run_out() {
        let mut source = BlankFrames::new(8, 6, 2);
        assert_eq!(source.next_frame().unwrap().unwrap().dimensions(), (8, 6));
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_image_sequence_order_and_mirror() {
        let dir = tempfile::tempdir().unwrap();
        for (name, shade) in [("b.png", 20u8), ("a.png", 10u8)] {
            let mut img = RgbImage::from_pixel(2, 1, Rgb([shade, shade, shade]));
            img.put_pixel(0, 0, Rgb([255, 0, 0]));
            img.save(dir.path().join(name)).unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

        let mut source = ImageSequence::open(dir.path(), true).unwrap();
        assert_eq!(source.remaining(), 2);

        let first = source.next_frame().unwrap().unwrap();
        // Mirrored: the red pixel moved to the right edge
        assert_eq!(first.get_pixel(1, 0), &Rgb([255, 0, 0]));
        assert_eq!(first.get_pixel(0, 0), &Rgb([10, 10, 10]));

        let second = source.next_frame().unwrap().unwrap();
        assert_eq!(second.get_pixel(0, 0), &Rgb([20, 20, 20]));
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_missing_directory() {
        assert!(ImageSequence::open(Path::new("no/such/dir"), false).is_err());
    }
}
