//! Application configuration
//!
//! Everything has a default, so a config file only needs the keys it changes:
//!
//! ```toml
//! food_asset = "assets/Donut.png"
//!
//! [game]
//! contour = "open"
//!
//! [tracker]
//! detection_confidence = 0.7
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::game::GameConfig;
use crate::video::CaptureConfig;
use crate::vision::DetectorConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Food image, re-read on every restart
    pub food_asset: PathBuf,
    /// Upper bound on the per-frame key wait
    pub key_timeout_ms: u64,
    pub game: GameConfig,
    pub capture: CaptureConfig,
    pub tracker: DetectorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            food_asset: PathBuf::from("Donut.png"),
            key_timeout_ms: 1,
            game: GameConfig::default(),
            capture: CaptureConfig::default(),
            tracker: DetectorConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&text).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
