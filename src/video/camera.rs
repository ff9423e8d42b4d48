use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use image::RgbImage;
use opencv::{
    core::{self, Mat},
    highgui, imgproc,
    prelude::*,
    videoio::{self, VideoCapture},
};
use tracing::{info, warn};

use super::{CaptureConfig, Display, FrameSource};
use crate::input::char_key;

/// Webcam frames through OpenCV
///
/// The device is released when the source is dropped.
pub struct CameraSource {
    capture: VideoCapture,
    mirror: bool,
}

impl CameraSource {
    pub fn open(config: &CaptureConfig) -> Result<Self> {
        let mut capture = VideoCapture::new(config.device, videoio::CAP_ANY)
            .with_context(|| format!("Failed to open camera {}", config.device))?;
        if !capture.is_opened()? {
            bail!("Camera {} is not available", config.device);
        }

        // Requests only; the driver may pick the nearest supported mode
        let _ = capture.set(videoio::CAP_PROP_FRAME_WIDTH, f64::from(config.width));
        let _ = capture.set(videoio::CAP_PROP_FRAME_HEIGHT, f64::from(config.height));

        info!(
            device = config.device,
            width = config.width,
            height = config.height,
            "Camera opened"
        );

        Ok(Self {
            capture,
            mirror: config.mirror,
        })
    }
}

impl FrameSource for CameraSource {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.empty() {
            return Ok(None);
        }

        let oriented = if self.mirror {
            let mut flipped = Mat::default();
            core::flip(&frame, &mut flipped, 1)?;
            flipped
        } else {
            frame
        };

        let mut rgb = Mat::default();
        imgproc::cvt_color(&oriented, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;

        let (width, height) = (rgb.cols() as u32, rgb.rows() as u32);
        let bytes = rgb.data_bytes()?.to_vec();
        let image = RgbImage::from_raw(width, height, bytes)
            .context("Camera frame size does not match its buffer")?;
        Ok(Some(image))
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        if let Err(e) = self.capture.release() {
            warn!("Failed to release camera: {e}");
        }
    }
}

/// Preview window through OpenCV's highgui
pub struct HighGuiWindow {
    title: String,
}

impl HighGuiWindow {
    pub fn open(title: &str) -> Result<Self> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE)
            .with_context(|| format!("Failed to open window {title:?}"))?;
        Ok(Self {
            title: title.to_string(),
        })
    }
}

/// Map a highgui key code to a key event
fn key_from_code(code: i32) -> Option<KeyEvent> {
    if code < 0 {
        return None;
    }
    match code & 0xFF {
        27 => Some(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
        c => char::from_u32(c as u32).map(char_key),
    }
}

impl Display for HighGuiWindow {
    fn present(&mut self, frame: &RgbImage) -> Result<()> {
        let flat = Mat::from_slice(frame.as_raw())?;
        let rgb = flat.reshape(3, frame.height() as i32)?;
        let mut bgr = Mat::default();
        imgproc::cvt_color(&*rgb, &mut bgr, imgproc::COLOR_RGB2BGR, 0)?;
        highgui::imshow(&self.title, &bgr)?;
        Ok(())
    }

    fn wait_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        // highgui treats 0 as "wait forever"
        let delay = timeout.as_millis().clamp(1, i32::MAX as u128) as i32;
        Ok(key_from_code(highgui::wait_key(delay)?))
    }
}

impl Drop for HighGuiWindow {
    fn drop(&mut self) {
        let _ = highgui::destroy_window(&self.title);
    }
}
