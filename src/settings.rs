use crate::frame::DetectorConfig;
use crate::gesture::GestureConfig;
use crate::keypad::{build_layout, default_layout, Button, LayoutError};
use crate::pipeline::{FrameMode, PipelineOptions};
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorKind {
    /// Synthesised hand following the mouse pointer in the window.
    #[default]
    Pointer,
    /// External landmark model process.
    Subprocess,
    /// Landmarks replayed from a JSON-lines script.
    Scripted,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DetectorSettings {
    #[serde(default)]
    pub kind: DetectorKind,
    /// Program started for [`DetectorKind::Subprocess`].
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    /// Landmark script for [`DetectorKind::Scripted`].
    #[serde(default)]
    pub script: Option<PathBuf>,
    #[serde(default = "default_max_hands")]
    pub max_hands: u32,
    #[serde(default = "default_confidence")]
    pub min_detection_confidence: f32,
    #[serde(default = "default_confidence")]
    pub min_tracking_confidence: f32,
}

fn default_max_hands() -> u32 {
    1
}

fn default_confidence() -> f32 {
    0.8
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            kind: DetectorKind::Pointer,
            command: None,
            args: Vec::new(),
            script: None,
            max_hands: default_max_hands(),
            min_detection_confidence: default_confidence(),
            min_tracking_confidence: default_confidence(),
        }
    }
}

impl DetectorSettings {
    pub fn config(&self) -> DetectorConfig {
        DetectorConfig {
            max_hands: self.max_hands,
            min_detection_confidence: self.min_detection_confidence,
            min_tracking_confidence: self.min_tracking_confidence,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Also write logs to this file.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub frame_mode: FrameMode,
    /// Directory of PNG frames. If `None`, a blank backdrop is used.
    #[serde(default)]
    pub frame_dir: Option<PathBuf>,
    /// Restart the frame directory from the top when it runs out.
    #[serde(default = "default_true")]
    pub loop_frames: bool,
    /// Size of the blank backdrop when no frame directory is set.
    #[serde(default = "default_frame_width")]
    pub frame_width: u32,
    #[serde(default = "default_frame_height")]
    pub frame_height: u32,
    /// Upper bound on the capture rate. `0` runs as fast as the source allows.
    #[serde(default = "default_max_fps")]
    pub max_fps: u32,
    #[serde(default = "default_pinch_threshold")]
    pub pinch_threshold_px: f64,
    /// Minimum time between two accepted selections.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Close the click gate even when a pinch lands on no button.
    #[serde(default)]
    pub gate_on_miss: bool,
    /// Number of history entries shown.
    #[serde(default = "default_history_display")]
    pub history_display: usize,
    #[serde(default)]
    pub highlight_hover: bool,
    #[serde(default = "default_true")]
    pub draw_landmarks: bool,
    /// Custom 4x4 keypad labels, row-major. If `None`, the standard keypad.
    #[serde(default)]
    pub keys: Option<Vec<Vec<String>>>,
    #[serde(default)]
    pub detector: DetectorSettings,
    /// Headless runs write processed frames here.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_frame_width() -> u32 {
    640
}

fn default_frame_height() -> u32 {
    600
}

fn default_max_fps() -> u32 {
    30
}

fn default_pinch_threshold() -> f64 {
    crate::gesture::interpreter::DEFAULT_PINCH_THRESHOLD_PX
}

fn default_debounce_ms() -> u64 {
    crate::gesture::gate::DEFAULT_DEBOUNCE_MS
}

fn default_history_display() -> usize {
    crate::calc::DISPLAY_ENTRIES
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            frame_mode: FrameMode::Continuous,
            frame_dir: None,
            loop_frames: true,
            frame_width: default_frame_width(),
            frame_height: default_frame_height(),
            max_fps: default_max_fps(),
            pinch_threshold_px: default_pinch_threshold(),
            debounce_ms: default_debounce_ms(),
            gate_on_miss: false,
            history_display: default_history_display(),
            highlight_hover: false,
            draw_landmarks: true,
            keys: None,
            detector: DetectorSettings::default(),
            output_dir: None,
        }
    }
}

impl Settings {
    /// Missing or empty file yields the defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.pinch_threshold_px > 0.0) {
            bail!("pinch_threshold_px must be positive, got {}", self.pinch_threshold_px);
        }
        if self.frame_width == 0 || self.frame_height == 0 {
            bail!(
                "frame size must be positive, got {}x{}",
                self.frame_width,
                self.frame_height
            );
        }
        for (name, value) in [
            ("min_detection_confidence", self.detector.min_detection_confidence),
            ("min_tracking_confidence", self.detector.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                bail!("{name} must be within 0..=1, got {value}");
            }
        }
        if self.detector.max_hands == 0 {
            bail!("max_hands must be at least 1");
        }
        match self.detector.kind {
            DetectorKind::Subprocess if self.detector.command.is_none() => {
                bail!("subprocess detector needs a command")
            }
            DetectorKind::Scripted if self.detector.script.is_none() => {
                bail!("scripted detector needs a script path")
            }
            _ => {}
        }
        Ok(())
    }

    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            threshold_px: self.pinch_threshold_px,
            debounce_ms: self.debounce_ms,
            gate_on_miss: self.gate_on_miss,
        }
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            highlight_hover: self.highlight_hover,
            draw_landmarks: self.draw_landmarks,
        }
    }

    /// Keypad built from `keys`, or the standard keypad.
    pub fn buttons(&self) -> Result<Vec<Button>, LayoutError> {
        match &self.keys {
            Some(rows) => build_layout(rows.as_slice()),
            None => Ok(default_layout()),
        }
    }
}
