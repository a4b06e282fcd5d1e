pub mod eval;
pub mod history;

pub use eval::{evaluate, format_result, EvalError};
pub use history::{CalcHistory, CalcHistoryEntry, DISPLAY_ENTRIES, ERROR_TOKEN};

pub const CLEAR: &str = "C";
pub const EQUALS: &str = "=";

/// Expression being typed plus the session history of evaluations.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    expression: String,
    history: CalcHistory,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn history(&self) -> &CalcHistory {
        &self.history
    }

    /// Applies one key press. Returns the history entry when `=` was pressed.
    ///
    /// An `Error` left over from the previous evaluation is discarded before
    /// the key is applied, so it never becomes part of a new expression.
    pub fn on_symbol(&mut self, label: &str) -> Option<&CalcHistoryEntry> {
        if self.expression == ERROR_TOKEN {
            self.expression.clear();
        }
        match label {
            CLEAR => {
                self.expression.clear();
                None
            }
            EQUALS => {
                let result = match evaluate(&self.expression) {
                    Ok(value) => format_result(value),
                    Err(err) => {
                        tracing::debug!(expr = %self.expression, error = %err, "evaluation failed");
                        ERROR_TOKEN.to_string()
                    }
                };
                self.history.push(CalcHistoryEntry {
                    expr: std::mem::take(&mut self.expression),
                    result: result.clone(),
                });
                self.expression = result;
                self.history.entries().last()
            }
            other => {
                self.expression.push_str(other);
                None
            }
        }
    }

    pub fn recent_history(&self, n: usize) -> Vec<&CalcHistoryEntry> {
        self.history.recent(n)
    }
}
