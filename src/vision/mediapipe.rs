//! Hand tracking through an external MediaPipe landmarker process
//!
//! The child process is started once and fed one frame per request over
//! stdin: a 12-byte header of width, height and channel count (little-endian
//! `u32`) followed by the raw RGB bytes. It answers each frame with one JSON
//! line:
//!
//! ```json
//! {"hands": [{"handedness": "Right", "score": 0.93,
//!             "landmarks": [{"x": 0.41, "y": 0.52, "z": -0.01}, ...]}]}
//! ```
//!
//! Landmark coordinates are normalized to the frame size. A failed inference
//! is reported as `{"hands": [], "error": "..."}`. Before the first frame the
//! process prints a single `READY` line.
//!
//! `tools/hand_detect.py` implements this protocol on top of MediaPipe Hands.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use anyhow::{bail, Context, Result};
use image::RgbImage;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{DetectorConfig, Hand, HandDetector, LANDMARK_COUNT};
use crate::game::Point;

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
    #[allow(dead_code)]
    #[serde(default)]
    z: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    handedness: String,
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionResult {
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Hand detector backed by a landmarker subprocess
pub struct MediaPipeDetector {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    confidence_threshold: f32,
    max_hands: usize,
}

impl MediaPipeDetector {
    /// Start the landmarker and wait until it is ready
    pub fn spawn(config: &DetectorConfig) -> Result<Self> {
        info!(command = %config.command, "Starting hand landmarker subprocess");

        let mut process = Command::new(&config.command)
            .args(&config.args)
            .arg("--max-hands")
            .arg(config.max_hands.to_string())
            .arg("--min-confidence")
            .arg(config.detection_confidence.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Failed to start hand landmarker: {}", config.command))?;

        let stdin = process.stdin.take().context("Failed to get landmarker stdin")?;
        let stdout = process.stdout.take().context("Failed to get landmarker stdout")?;
        let mut stdout = BufReader::new(stdout);

        let mut ready_line = String::new();
        stdout
            .read_line(&mut ready_line)
            .context("Failed to read landmarker handshake")?;
        if ready_line.trim() != "READY" {
            let _ = process.kill();
            bail!("Hand landmarker did not signal ready, got: {:?}", ready_line.trim());
        }

        info!("Hand landmarker ready");

        Ok(Self {
            process,
            stdin,
            stdout,
            confidence_threshold: config.detection_confidence.clamp(0.0, 1.0),
            max_hands: config.max_hands,
        })
    }

    fn send_frame(&mut self, frame: &RgbImage) -> Result<()> {
        let (width, height) = frame.dimensions();
        let mut header = Vec::with_capacity(12);
        header.extend_from_slice(&width.to_le_bytes());
        header.extend_from_slice(&height.to_le_bytes());
        header.extend_from_slice(&3u32.to_le_bytes());

        self.stdin.write_all(&header)?;
        self.stdin.write_all(frame.as_raw())?;
        self.stdin.flush()?;
        Ok(())
    }
}

/// Convert a parsed reply into hands in pixel coordinates
fn hands_from_result(
    result: DetectionResult,
    width: u32,
    height: u32,
    confidence_threshold: f32,
    max_hands: usize,
) -> Vec<Hand> {
    if let Some(error) = result.error {
        warn!("Hand landmarker error: {}", error);
        return Vec::new();
    }

    let mut hands = Vec::new();
    for hand in result.hands {
        if hands.len() >= max_hands {
            break;
        }
        if hand.score < confidence_threshold {
            continue;
        }
        if hand.landmarks.len() != LANDMARK_COUNT {
            warn!("Expected {} landmarks, got {}", LANDMARK_COUNT, hand.landmarks.len());
            continue;
        }

        let mut landmarks = [Point::default(); LANDMARK_COUNT];
        for (slot, lm) in landmarks.iter_mut().zip(&hand.landmarks) {
            *slot = Point::new(
                (lm.x * width as f32).round() as i32,
                (lm.y * height as f32).round() as i32,
            );
        }

        debug!(
            handedness = %hand.handedness,
            confidence = hand.score,
            tip = ?landmarks[super::landmarks::INDEX_FINGER_TIP],
            "Hand detected"
        );

        hands.push(Hand {
            landmarks,
            handedness: hand.handedness,
        });
    }
    hands
}

impl HandDetector for MediaPipeDetector {
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Hand>> {
        if frame.width() == 0 || frame.height() == 0 {
            return Ok(Vec::new());
        }

        self.send_frame(frame)
            .context("Failed to send frame to hand landmarker")?;

        let mut response = String::new();
        let read = self
            .stdout
            .read_line(&mut response)
            .context("Failed to read hand landmarker reply")?;
        if read == 0 {
            bail!("Hand landmarker exited");
        }

        let result: DetectionResult = serde_json::from_str(&response)
            .with_context(|| format!("Failed to parse landmarker reply: {}", response.trim()))?;

        Ok(hands_from_result(
            result,
            frame.width(),
            frame.height(),
            self.confidence_threshold,
            self.max_hands,
        ))
    }
}

impl Drop for MediaPipeDetector {
    fn drop(&mut self) {
        // Kill the subprocess when the detector is dropped
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(hands: &[(f32, usize)]) -> DetectionResult {
        let hands_json: Vec<String> = hands
            .iter()
            .map(|(score, count)| {
                let lms: Vec<String> = (0..*count)
                    .map(|i| format!(r#"{{"x": 0.5, "y": {}, "z": 0.0}}"#, i as f32 / 40.0))
                    .collect();
                format!(
                    r#"{{"handedness": "Right", "score": {score}, "landmarks": [{}]}}"#,
                    lms.join(",")
                )
            })
            .collect();
        serde_json::from_str(&format!(r#"{{"hands": [{}]}}"#, hands_json.join(","))).unwrap()
    }

    #[test]
    fn test_landmarks_scaled_to_pixels() {
        let hands = hands_from_result(reply(&[(0.9, 21)]), 1280, 720, 0.8, 1);

        assert_eq!(hands.len(), 1);
        // Index tip has y = 8 / 40
        assert_eq!(hands[0].index_fingertip(), Point::new(640, 144));
    }

    #[test]
    fn test_low_confidence_dropped() {
        let hands = hands_from_result(reply(&[(0.5, 21), (0.95, 21)]), 100, 100, 0.8, 2);
        assert_eq!(hands.len(), 1);
        assert!(hands_from_result(reply(&[(0.5, 21), (0.79, 21)]), 100, 100, 0.8, 2).is_empty());
    }

    #[test]
    fn test_max_hands_and_malformed() {
        let hands = hands_from_result(reply(&[(0.9, 5), (0.9, 21), (0.9, 21)]), 100, 100, 0.8, 1);
        assert_eq!(hands.len(), 1);
    }

    #[test]
    fn test_error_reply_means_no_hand() {
        let result: DetectionResult =
            serde_json::from_str(r#"{"hands": [], "error": "model failed"}"#).unwrap();
        assert!(hands_from_result(result, 100, 100, 0.8, 1).is_empty());
    }

    #[test]
    fn test_default_landmarker_ships_with_crate() {
        let config = DetectorConfig::default();
        let script = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(&config.args[0]);
        assert!(script.is_file(), "missing {script:?}");
    }

    #[cfg(unix)]
    #[test]
    fn test_subprocess_round_trip() {
        // Stand-in landmarker: handshake, swallow one 2x1 frame, reply one hand
        let landmarks = vec![r#"{"x": 0.5, "y": 1.0}"#; LANDMARK_COUNT].join(",");
        let reply = format!(r#"{{"hands": [{{"handedness": "Left", "score": 0.9, "landmarks": [{landmarks}]}}]}}"#);
        let config = DetectorConfig {
            command: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                format!("echo READY; head -c 18 >/dev/null; echo '{reply}'; cat >/dev/null"),
            ],
            ..Default::default()
        };

        let mut detector = MediaPipeDetector::spawn(&config).unwrap();
        let hands = detector.detect(&RgbImage::new(2, 1)).unwrap();

        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].handedness, "Left");
        assert_eq!(hands[0].index_fingertip(), Point::new(1, 1));
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_handshake() {
        let config = DetectorConfig {
            command: "sh".to_string(),
            args: vec!["-c".to_string(), "echo loading".to_string()],
            ..Default::default()
        };
        assert!(MediaPipeDetector::spawn(&config).is_err());
    }
}
