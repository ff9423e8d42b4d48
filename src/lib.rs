//! Finger Snake - steer a snake with your index finger
//!
//! This library provides:
//! - Core game logic (game module), free of any I/O
//! - Overlay composition and rasterization (render module)
//! - Camera, image-sequence and headless frame plumbing (video module)
//! - Hand landmark detection (vision module)
//! - The synchronous frame loop (modes module)

pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
pub mod video;
pub mod vision;

pub use config::AppConfig;
pub use error::{AssetLoadError, RenderError};
pub use session::SnakeGame;
