pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Suppresses a second selection until `interval_ms` has passed since the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickGate {
    interval_ms: u64,
    last_click_ms: Option<u64>,
}

impl Default for ClickGate {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

impl ClickGate {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_click_ms: None,
        }
    }

    /// Open strictly after the interval; a gate that never fired is open.
    pub fn is_open(&self, at_ms: u64) -> bool {
        match self.last_click_ms {
            None => true,
            Some(last) => at_ms.saturating_sub(last) > self.interval_ms,
        }
    }

    pub fn record(&mut self, at_ms: u64) {
        self.last_click_ms = Some(at_ms);
    }

    pub fn last_click_ms(&self) -> Option<u64> {
        self.last_click_ms
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn reset(&mut self) {
        self.last_click_ms = None;
    }
}
