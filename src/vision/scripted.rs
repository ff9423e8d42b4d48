//! Recorded fingertips and key presses for headless runs
//!
//! A replay script is a JSON document with one entry per frame:
//!
//! ```json
//! {"frames": [{"tip": [640, 360]}, {"tip": null}, {"tip": [650, 362], "key": "r"}]}
//! ```
//!
//! `tip` is the fingertip seen in that frame (absent or `null` when no hand is
//! visible) and `key` an optional key pressed after the frame is shown.

use std::collections::VecDeque;
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::event::KeyEvent;
use image::RgbImage;
use serde::{Deserialize, Serialize};

use super::{Hand, HandDetector};
use crate::game::Point;
use crate::input::char_key;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptFrame {
    #[serde(default)]
    pub tip: Option<[i32; 2]>,
    #[serde(default)]
    pub key: Option<char>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub frames: Vec<ScriptFrame>,
}

impl ReplayScript {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script: {:?}", path))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse replay script: {:?}", path))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Separate the per-frame fingertips from the per-frame keys
    pub fn split(self) -> (ScriptedHands, VecDeque<Option<KeyEvent>>) {
        let mut tips = VecDeque::with_capacity(self.frames.len());
        let mut keys = VecDeque::with_capacity(self.frames.len());
        for frame in self.frames {
            tips.push_back(frame.tip.map(Point::from));
            keys.push_back(frame.key.map(char_key));
        }
        (ScriptedHands { tips }, keys)
    }
}

/// Reports one scripted fingertip per call, in order
#[derive(Debug, Clone, Default)]
pub struct ScriptedHands {
    tips: VecDeque<Option<Point>>,
}

impl HandDetector for ScriptedHands {
    fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<Hand>> {
        Ok(self
            .tips
            .pop_front()
            .flatten()
            .map(Hand::from_fingertip)
            .into_iter()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn test_parse_and_split() {
        let script: ReplayScript = serde_json::from_str(
            r#"{"frames": [{"tip": [10, 20]}, {"tip": null}, {"key": "r"}]}"#,
        )
        .unwrap();
        assert_eq!(script.len(), 3);

        let (mut hands, keys) = script.split();
        let frame = RgbImage::new(4, 4);

        let first = hands.detect(&frame).unwrap();
        assert_eq!(first[0].index_fingertip(), Point::new(10, 20));
        assert!(hands.detect(&frame).unwrap().is_empty());
        assert!(hands.detect(&frame).unwrap().is_empty());
        // Exhausted scripts report no hand
        assert!(hands.detect(&frame).unwrap().is_empty());

        assert_eq!(keys.len(), 3);
        assert_eq!(keys[2].map(|k| k.code), Some(KeyCode::Char('r')));
        assert!(keys[0].is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.json");
        std::fs::write(&path, r#"{"frames": [{"tip": [1, 2], "key": "q"}]}"#).unwrap();

        let script = ReplayScript::load(&path).unwrap();
        assert_eq!(
            script.frames[0],
            ScriptFrame {
                tip: Some([1, 2]),
                key: Some('q')
            }
        );
        assert!(ReplayScript::load(&dir.path().join("missing.json")).is_err());
    }
}
