//! Frame sources and display surfaces
//!
//! Live capture and the preview window go through OpenCV and are only built
//! with the `opencv-backend` feature. Image sequences, blank canvases and the
//! PNG dump work everywhere.

#[cfg(feature = "opencv-backend")]
pub mod camera;
pub mod dump;
pub mod sequence;

use std::time::Duration;

use anyhow::Result;
use crossterm::event::KeyEvent;
use image::RgbImage;
use serde::{Deserialize, Serialize};

#[cfg(feature = "opencv-backend")]
pub use camera::{CameraSource, HighGuiWindow};
pub use dump::FrameDump;
pub use sequence::{BlankFrames, ImageSequence};

/// Title of the live preview window
pub const WINDOW_TITLE: &str = "Snake Game";

/// Produces frames on demand
pub trait FrameSource {
    /// Next frame, or `None` once the source is exhausted
    fn next_frame(&mut self) -> Result<Option<RgbImage>>;
}

/// Shows annotated frames and reports key presses
pub trait Display {
    fn present(&mut self, frame: &RgbImage) -> Result<()>;

    /// Wait at most `timeout` for a key press
    fn wait_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>>;
}

/// Camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Camera index
    pub device: i32,
    /// Requested frame width in pixels
    pub width: u32,
    /// Requested frame height in pixels
    pub height: u32,
    /// Flip frames horizontally so the preview behaves like a mirror
    pub mirror: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device: 0,
            width: 1280,
            height: 720,
            mirror: true,
        }
    }
}
