use serde::{Deserialize, Serialize};

/// Shape the self-collision test measures against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContourMode {
    /// Oldest and newest contour points are joined, like a polygon
    #[default]
    Closed,
    /// Plain polyline, no closing edge
    Open,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Length cap of a fresh snake, in pixels
    pub initial_allowed_length: f64,
    /// Added to the cap for every food collected
    pub growth_per_food: f64,
    /// Inclusive horizontal range for food placement
    pub food_x: (i32, i32),
    /// Inclusive vertical range for food placement
    pub food_y: (i32, i32),
    /// Head-to-body distance at or below which the snake has hit itself
    pub collision_tolerance: f64,
    /// Newest points left out of the self-collision contour
    pub head_exclusion: usize,
    pub contour: ContourMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_allowed_length: 150.0,
            growth_per_food: 50.0,
            food_x: (100, 1000),
            food_y: (100, 600),
            collision_tolerance: 1.0,
            head_exclusion: 2,
            contour: ContourMode::Closed,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom starting cap
    pub fn with_allowed_length(length: f64) -> Self {
        Self {
            initial_allowed_length: length,
            ..Default::default()
        }
    }
}
