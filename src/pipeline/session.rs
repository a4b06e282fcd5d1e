use crate::calc::{CalcHistoryEntry, Calculator};
use crate::gesture::{GestureConfig, GestureInterpreter, HandLandmarks, PinchOutcome};
use crate::keypad::Button;
use std::sync::{Arc, Mutex, MutexGuard};

/// Everything a user changes during a session: the expression, its history
/// and the click gate.
#[derive(Debug, Clone, Default)]
pub struct Session {
    calculator: Calculator,
    gesture: GestureInterpreter,
}

impl Session {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            calculator: Calculator::new(),
            gesture: GestureInterpreter::new(config),
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn gesture(&self) -> &GestureInterpreter {
        &self.gesture
    }

    pub fn expression(&self) -> &str {
        self.calculator.expression()
    }

    pub fn recent_history(&self, n: usize) -> Vec<&CalcHistoryEntry> {
        self.calculator.recent_history(n)
    }

    /// Interprets the hand and applies a selected key to the calculator.
    pub fn handle_hand(
        &mut self,
        hand: Option<&HandLandmarks>,
        buttons: &[Button],
        at_ms: u64,
    ) -> PinchOutcome {
        let outcome = self.gesture.interpret(hand, buttons, at_ms);
        if let Some(label) = outcome.selected_label() {
            if let Some(entry) = self.calculator.on_symbol(label) {
                tracing::info!(expr = %entry.expr, result = %entry.result, "evaluated");
            }
        }
        outcome
    }

    /// Applies a key press that did not come from a gesture.
    pub fn press(&mut self, label: &str) {
        self.calculator.on_symbol(label);
    }
}

/// Session shared between the frame handler and the UI.
#[derive(Debug, Clone, Default)]
pub struct SharedSession(Arc<Mutex<Session>>);

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    /// Locks the session, recovering a lock poisoned by a panicking holder.
    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.0.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("session lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }

    pub fn view(&self, history_entries: usize) -> SessionView {
        let session = self.lock();
        SessionView {
            expression: session.expression().to_string(),
            history: session
                .recent_history(history_entries)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

/// Owned copy of what the UI displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub expression: String,
    /// Newest first.
    pub history: Vec<CalcHistoryEntry>,
}
