use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use tracing::warn;

/// Reads key presses from the controlling terminal
///
/// Raw mode is enabled for as long as the value lives.
pub struct TerminalKeys {
    _private: (),
}

impl TerminalKeys {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        Ok(Self { _private: () })
    }

    /// Wait up to `timeout` for a key press
    pub fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if !event::poll(timeout).context("Failed to poll terminal events")? {
            return Ok(None);
        }
        match event::read().context("Failed to read terminal event")? {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

impl Drop for TerminalKeys {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to disable raw mode: {e}");
        }
    }
}
