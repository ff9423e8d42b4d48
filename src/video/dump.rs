use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::KeyEvent;
use image::RgbImage;

use super::Display;
use crate::input::TerminalKeys;

/// Headless display: writes frames as numbered PNGs
///
/// Keys come from a queue with one optional entry per presented frame, then
/// from the terminal if one is attached.
pub struct FrameDump {
    output_dir: Option<PathBuf>,
    presented: usize,
    scripted_keys: VecDeque<Option<KeyEvent>>,
    terminal: Option<TerminalKeys>,
}

impl FrameDump {
    /// Write frames into `output_dir`, or discard them when `None`
    pub fn new(output_dir: Option<&Path>) -> Result<Self> {
        if let Some(dir) = output_dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {:?}", dir))?;
        }
        Ok(Self {
            output_dir: output_dir.map(Path::to_path_buf),
            presented: 0,
            scripted_keys: VecDeque::new(),
            terminal: None,
        })
    }

    pub fn with_scripted_keys(mut self, keys: VecDeque<Option<KeyEvent>>) -> Self {
        self.scripted_keys = keys;
        self
    }

    pub fn with_terminal(mut self, terminal: TerminalKeys) -> Self {
        self.terminal = Some(terminal);
        self
    }

    /// Number of frames presented so far
    pub fn presented(&self) -> usize {
        self.presented
    }

    fn frame_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("frame_{:05}.png", self.presented))
    }
}

impl Display for FrameDump {
    fn present(&mut self, frame: &RgbImage) -> Result<()> {
        if let Some(dir) = &self.output_dir {
            let path = self.frame_path(dir);
            frame
                .save(&path)
                .with_context(|| format!("Failed to write frame to {:?}", path))?;
        }
        self.presented += 1;
        Ok(())
    }

    fn wait_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if let Some(key) = self.scripted_keys.pop_front().flatten() {
            return Ok(Some(key));
        }
        match self.terminal.as_mut() {
            Some(terminal) => terminal.poll_key(timeout),
            None => Ok(None),
        }
    }
}
