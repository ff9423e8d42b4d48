//! Core game logic for the fingertip snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Rendering reads [`GameState`] through the `render` module; frames and hands
//! never reach this layer, only the fingertip [`Point`].

pub mod config;
pub mod engine;
pub mod geometry;
pub mod state;

// Re-export commonly used types
pub use config::{ContourMode, GameConfig};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use geometry::{signed_distance, Point};
pub use state::{Food, GamePhase, GameState, SnakePath};
