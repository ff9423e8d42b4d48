//! Hand detection collaborators
//!
//! The game only needs the index fingertip of the first detected hand.
//! Detectors report full 21-point hands in frame pixel coordinates so the
//! choice of landmark stays on this side of the boundary.

pub mod mediapipe;
pub mod scripted;

use anyhow::Result;
use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::game::Point;

pub use mediapipe::MediaPipeDetector;
pub use scripted::ScriptedHands;

/// Number of landmarks in a hand
pub const LANDMARK_COUNT: usize = 21;

/// Hand landmark indices (MediaPipe hand landmark model convention)
///
/// Each finger runs from its base joint to its tip in consecutive indices.
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_TIP: usize = 20;

    /// First and last landmark of every finger
    pub const FINGERS: [(usize, usize); 5] = [
        (THUMB_CMC, THUMB_TIP),
        (INDEX_FINGER_MCP, INDEX_FINGER_TIP),
        (MIDDLE_FINGER_MCP, MIDDLE_FINGER_TIP),
        (RING_FINGER_MCP, RING_FINGER_TIP),
        (PINKY_MCP, PINKY_TIP),
    ];

    /// Palm edges joining the wrist and the finger bases
    pub const PALM: [(usize, usize); 6] = [
        (WRIST, THUMB_CMC),
        (WRIST, INDEX_FINGER_MCP),
        (INDEX_FINGER_MCP, MIDDLE_FINGER_MCP),
        (MIDDLE_FINGER_MCP, RING_FINGER_MCP),
        (RING_FINGER_MCP, PINKY_MCP),
        (WRIST, PINKY_MCP),
    ];

    /// All 21 skeleton edges
    pub fn connections() -> impl Iterator<Item = (usize, usize)> {
        PALM.into_iter().chain(
            FINGERS
                .into_iter()
                .flat_map(|(base, tip)| (base..tip).map(|i| (i, i + 1))),
        )
    }
}

/// A detected hand with its landmarks in pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    pub landmarks: [Point; LANDMARK_COUNT],
    /// "Left" or "Right" as reported by the detector
    pub handedness: String,
}

impl Hand {
    /// A hand whose every landmark sits on the fingertip
    pub fn from_fingertip(tip: Point) -> Self {
        Self {
            landmarks: [tip; LANDMARK_COUNT],
            handedness: "Right".to_string(),
        }
    }

    pub fn index_fingertip(&self) -> Point {
        self.landmarks[landmarks::INDEX_FINGER_TIP]
    }

    /// Smallest and largest landmark coordinates
    pub fn bounds(&self) -> (Point, Point) {
        self.landmarks.iter().fold(
            (self.landmarks[0], self.landmarks[0]),
            |(min, max), p| {
                (
                    Point::new(min.x.min(p.x), min.y.min(p.y)),
                    Point::new(max.x.max(p.x), max.y.max(p.y)),
                )
            },
        )
    }
}

/// Options passed to any detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Minimum confidence to report a hand
    pub detection_confidence: f32,
    /// Cap on simultaneously tracked hands
    pub max_hands: usize,
    /// Program that runs the landmark model
    pub command: String,
    pub args: Vec<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            detection_confidence: 0.8,
            max_hands: 1,
            command: "python3".to_string(),
            args: vec!["tools/hand_detect.py".to_string()],
        }
    }
}

/// Finds hands in a frame
pub trait HandDetector {
    /// Detect up to the configured number of hands; empty when none is visible
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Hand>>;
}

/// The fingertip that steers the snake, if any hand was found
pub fn steering_fingertip(hands: &[Hand]) -> Option<Point> {
    hands.first().map(Hand::index_fingertip)
}
