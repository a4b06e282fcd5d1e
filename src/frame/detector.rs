//! Hand landmark detectors.
//!
//! The landmark model itself lives outside this crate. [`SubprocessDetector`]
//! talks to a model process over stdin/stdout; the other detectors replay or
//! synthesise landmarks so the pipeline can run without one.

use crate::geometry::Point;
use crate::gesture::landmarks::HandLandmarks;
use crate::render::canvas::RgbaBuffer;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};
use std::sync::{Arc, Mutex};

pub trait HandDetector: Send {
    /// Landmarks of the first detected hand in pixel coordinates, if any.
    fn detect(&mut self, frame: &RgbaBuffer) -> Result<Option<HandLandmarks>>;
}

impl<D: HandDetector + ?Sized> HandDetector for Box<D> {
    fn detect(&mut self, frame: &RgbaBuffer) -> Result<Option<HandLandmarks>> {
        (**self).detect(frame)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    pub max_hands: u32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_hands: 1,
            min_detection_confidence: 0.8,
            min_tracking_confidence: 0.8,
        }
    }
}

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
    #[serde(default)]
    #[allow(dead_code)]
    z: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
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

/// Landmark model running in a child process.
///
/// The child prints `READY` once loaded. Each frame is sent as three
/// little-endian `u32`s (width, height, channels = 4) followed by the RGBA
/// bytes; the child answers with one JSON line of normalised landmarks.
pub struct SubprocessDetector {
    process: Child,
    stdout_reader: BufReader<ChildStdout>,
    config: DetectorConfig,
}

impl SubprocessDetector {
    pub fn spawn(command: &str, args: &[String], config: DetectorConfig) -> Result<Self> {
        tracing::info!(command, "starting hand landmark subprocess");

        let mut process = Command::new(command)
            .args(args)
            .arg("--max-hands")
            .arg(config.max_hands.to_string())
            .arg("--min-detection-confidence")
            .arg(config.min_detection_confidence.to_string())
            .arg("--min-tracking-confidence")
            .arg(config.min_tracking_confidence.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("failed to start detector process `{command}`"))?;

        let stdout = process
            .stdout
            .take()
            .context("detector process has no stdout")?;
        let mut stdout_reader = BufReader::new(stdout);

        let mut ready_line = String::new();
        stdout_reader.read_line(&mut ready_line)?;
        if ready_line.trim() != "READY" {
            let _ = process.kill();
            bail!("detector process did not signal ready, got: {:?}", ready_line.trim());
        }

        tracing::info!("hand landmark subprocess ready");
        Ok(Self {
            process,
            stdout_reader,
            config,
        })
    }
}

/// First hand passing the detection confidence, among the first `max_hands` that do.
fn select_hand(
    config: &DetectorConfig,
    result: DetectionResult,
    width: u32,
    height: u32,
) -> Option<HandLandmarks> {
    if let Some(error) = result.error {
        tracing::warn!("detector process reported: {}", error);
        return None;
    }
    result
        .hands
        .into_iter()
        .filter(|hand| hand.score >= config.min_detection_confidence)
        .take(config.max_hands.max(1) as usize)
        .find_map(|hand| {
            let coords: Vec<(f32, f32)> = hand.landmarks.iter().map(|lm| (lm.x, lm.y)).collect();
            match HandLandmarks::from_normalized(&coords, width, height) {
                Ok(landmarks) => {
                    tracing::trace!(handedness = %hand.handedness, score = hand.score, "hand detected");
                    Some(landmarks)
                }
                Err(err) => {
                    tracing::warn!("discarding hand: {}", err);
                    None
                }
            }
        })
}

impl HandDetector for SubprocessDetector {
    fn detect(&mut self, frame: &RgbaBuffer) -> Result<Option<HandLandmarks>> {
        if frame.width == 0 || frame.height == 0 {
            return Ok(None);
        }

        let stdin = self
            .process
            .stdin
            .as_mut()
            .context("detector process has no stdin")?;
        stdin.write_all(&frame.width.to_le_bytes())?;
        stdin.write_all(&frame.height.to_le_bytes())?;
        stdin.write_all(&4u32.to_le_bytes())?;
        stdin.write_all(&frame.pixels)?;
        stdin.flush()?;

        let mut response = String::new();
        if self.stdout_reader.read_line(&mut response)? == 0 {
            bail!("detector process closed its output");
        }
        let result: DetectionResult = serde_json::from_str(&response)
            .with_context(|| format!("failed to parse detector response: {}", response.trim()))?;
        Ok(select_hand(&self.config, result, frame.width, frame.height))
    }
}

impl Drop for SubprocessDetector {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

/// Replays recorded landmarks, one entry per frame; no hand once exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDetector {
    frames: VecDeque<Option<HandLandmarks>>,
}

impl ScriptedDetector {
    pub fn new(frames: impl IntoIterator<Item = Option<HandLandmarks>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Reads JSON lines: `null` for no hand, or 21 `[x, y]` pixel pairs.
    /// Blank lines are skipped.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read landmark script {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid landmark script {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut frames = VecDeque::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parsed: Option<Vec<[i32; 2]>> = serde_json::from_str(line)
                .with_context(|| format!("line {}", idx + 1))?;
            let hand = match parsed {
                None => None,
                Some(pairs) => {
                    let points: Vec<Point> = pairs.into_iter().map(|[x, y]| Point::new(x, y)).collect();
                    Some(HandLandmarks::try_from(points).with_context(|| format!("line {}", idx + 1))?)
                }
            };
            frames.push_back(hand);
        }
        Ok(Self { frames })
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl HandDetector for ScriptedDetector {
    fn detect(&mut self, _frame: &RgbaBuffer) -> Result<Option<HandLandmarks>> {
        Ok(self.frames.pop_front().flatten())
    }
}

/// Tip gap of the synthetic hand while the pointer is held down.
pub const POINTER_PINCHED_GAP: i32 = 10;
/// Tip gap of the synthetic hand while the pointer is released.
pub const POINTER_OPEN_GAP: i32 = 80;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerState {
    /// Frame coordinates, `None` when the pointer is outside the frame.
    pub position: Option<Point>,
    pub pressed: bool,
}

/// Shared pointer state written by the UI and read by [`PointerDetector`].
#[derive(Debug, Clone, Default)]
pub struct PointerHandle(Arc<Mutex<PointerState>>);

impl PointerHandle {
    pub fn set(&self, state: PointerState) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    pub fn get(&self) -> PointerState {
        *self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Turns a pointer into a hand: the index tip follows the pointer and
/// pressing closes the pinch.
#[derive(Debug, Clone, Default)]
pub struct PointerDetector {
    handle: PointerHandle,
}

impl PointerDetector {
    pub fn new(handle: PointerHandle) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> PointerHandle {
        self.handle.clone()
    }
}

impl HandDetector for PointerDetector {
    fn detect(&mut self, _frame: &RgbaBuffer) -> Result<Option<HandLandmarks>> {
        let state = self.handle.get();
        Ok(state.position.map(|tip| {
            let gap = if state.pressed {
                POINTER_PINCHED_GAP
            } else {
                POINTER_OPEN_GAP
            };
            HandLandmarks::synthetic(tip, gap)
        }))
    }
}

/// Detector that never sees a hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHandDetector;

impl HandDetector for NoHandDetector {
    fn detect(&mut self, _frame: &RgbaBuffer) -> Result<Option<HandLandmarks>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::landmarks::LANDMARK_COUNT;

    fn normalized_hand(score: f32, count: usize) -> HandJson {
        HandJson {
            handedness: "Right".into(),
            score,
            landmarks: (0..count)
                .map(|i| LandmarkJson {
                    x: i as f32 / 100.0,
                    y: 0.5,
                    z: 0.0,
                })
                .collect(),
        }
    }

    #[test]
    fn low_confidence_hands_are_skipped() {
        let result = DetectionResult {
            hands: vec![normalized_hand(0.5, LANDMARK_COUNT), normalized_hand(0.9, LANDMARK_COUNT)],
            error: None,
        };
        let hand = select_hand(&DetectorConfig::default(), result, 100, 100).unwrap();
        assert_eq!(hand.point(10), Point::new(10, 50));
    }

    #[test]
    fn incomplete_or_errored_responses_yield_no_hand() {
        let short = DetectionResult {
            hands: vec![normalized_hand(0.99, LANDMARK_COUNT - 1)],
            error: None,
        };
        assert!(select_hand(&DetectorConfig::default(), short, 100, 100).is_none());

        let errored = DetectionResult {
            hands: vec![normalized_hand(0.99, LANDMARK_COUNT)],
            error: Some("camera busy".into()),
        };
        assert!(select_hand(&DetectorConfig::default(), errored, 100, 100).is_none());
    }

    #[test]
    fn response_json_parses() {
        let line = r#"{"hands":[{"handedness":"Left","score":0.95,"landmarks":[{"x":0.1,"y":0.2,"z":0.0}]}],"error":null}"#;
        let result: DetectionResult = serde_json::from_str(line).unwrap();
        assert_eq!(result.hands.len(), 1);
        assert_eq!(result.hands[0].handedness, "Left");
    }

    #[test]
    fn pointer_press_closes_the_pinch() {
        let handle = PointerHandle::default();
        let mut detector = PointerDetector::new(handle.clone());
        let frame = RgbaBuffer::new(1, 1, crate::render::Rgba::BLACK);
        assert!(detector.detect(&frame).unwrap().is_none());

        handle.set(PointerState {
            position: Some(Point::new(200, 200)),
            pressed: true,
        });
        let hand = detector.detect(&frame).unwrap().unwrap();
        assert!(hand.thumb_tip().distance(hand.index_tip()) < 40.0);
    }
}
