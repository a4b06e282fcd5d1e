use crate::geometry::Point;
use crate::gesture::gate::{ClickGate, DEFAULT_DEBOUNCE_MS};
use crate::gesture::landmarks::HandLandmarks;
use crate::keypad::button::{hit_test, Button};

pub const DEFAULT_PINCH_THRESHOLD_PX: f64 = 40.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Pinch fires below this tip distance, in native frame pixels.
    pub threshold_px: f64,
    pub debounce_ms: u64,
    /// Advance the click gate when a pinch lands on no button.
    pub gate_on_miss: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            threshold_px: DEFAULT_PINCH_THRESHOLD_PX,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            gate_on_miss: false,
        }
    }
}

/// Result of interpreting one frame's hand.
#[derive(Debug, Clone, PartialEq)]
pub enum PinchOutcome {
    NoHand,
    /// Tips too far apart to count as a pinch.
    Open { distance: f64, cursor: Point },
    /// Pinched, but the click gate is still closed.
    Debounced { distance: f64, cursor: Point },
    /// Pinched with the gate open, over no button.
    Missed { distance: f64, cursor: Point },
    Selected {
        label: String,
        distance: f64,
        cursor: Point,
    },
}

impl PinchOutcome {
    pub fn cursor(&self) -> Option<Point> {
        match self {
            PinchOutcome::NoHand => None,
            PinchOutcome::Open { cursor, .. }
            | PinchOutcome::Debounced { cursor, .. }
            | PinchOutcome::Missed { cursor, .. }
            | PinchOutcome::Selected { cursor, .. } => Some(*cursor),
        }
    }

    pub fn selected_label(&self) -> Option<&str> {
        match self {
            PinchOutcome::Selected { label, .. } => Some(label),
            _ => None,
        }
    }
}

/// Thumb-to-index pinch detector. Holds no per-frame state beyond the click gate.
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    threshold_px: f64,
    gate_on_miss: bool,
    gate: ClickGate,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            threshold_px: config.threshold_px,
            gate_on_miss: config.gate_on_miss,
            gate: ClickGate::new(config.debounce_ms),
        }
    }

    pub fn gate(&self) -> &ClickGate {
        &self.gate
    }

    pub fn interpret(
        &mut self,
        hand: Option<&HandLandmarks>,
        buttons: &[Button],
        at_ms: u64,
    ) -> PinchOutcome {
        let Some(hand) = hand else {
            return PinchOutcome::NoHand;
        };

        let thumb = hand.thumb_tip();
        let index = hand.index_tip();
        let distance = thumb.distance(index);
        let cursor = thumb.midpoint(index);

        if distance >= self.threshold_px {
            return PinchOutcome::Open { distance, cursor };
        }
        if !self.gate.is_open(at_ms) {
            return PinchOutcome::Debounced { distance, cursor };
        }

        match hit_test(buttons, cursor) {
            Some(button) => {
                self.gate.record(at_ms);
                tracing::debug!(
                    label = %button.label,
                    distance,
                    x = cursor.x,
                    y = cursor.y,
                    "pinch selected button"
                );
                PinchOutcome::Selected {
                    label: button.label.clone(),
                    distance,
                    cursor,
                }
            }
            None => {
                if self.gate_on_miss {
                    self.gate.record(at_ms);
                }
                tracing::debug!(distance, x = cursor.x, y = cursor.y, "pinch missed all buttons");
                PinchOutcome::Missed { distance, cursor }
            }
        }
    }
}
