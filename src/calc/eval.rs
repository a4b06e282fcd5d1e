#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    Empty,
    /// A character outside the arithmetic alphabet.
    InvalidCharacter(char),
    Malformed(String),
    /// Division by zero or overflow.
    NonFinite,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::Empty => write!(f, "expression is empty"),
            EvalError::InvalidCharacter(ch) => write!(f, "character {ch:?} is not arithmetic"),
            EvalError::Malformed(msg) => write!(f, "malformed expression: {msg}"),
            EvalError::NonFinite => write!(f, "result is not a finite number"),
        }
    }
}

impl std::error::Error for EvalError {}

fn is_arithmetic(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '.' | '+' | '-' | '*' | '/' | '(' | ')') || ch.is_whitespace()
}

/// Operator pairs that read as power or floor division elsewhere. Neither is
/// an operation here, so both are malformed.
const DOUBLED_OPERATORS: [&str; 2] = ["**", "//"];

/// Evaluates `+ - * /` with parentheses and standard precedence.
///
/// Input is screened against the arithmetic alphabet before `exmex` sees it,
/// so function names, variables and anything else the parser would accept
/// are rejected up front. `**` and `//` are rejected as well.
pub fn evaluate(expr: &str) -> Result<f64, EvalError> {
    if expr.trim().is_empty() {
        return Err(EvalError::Empty);
    }
    if let Some(ch) = expr.chars().find(|&ch| !is_arithmetic(ch)) {
        return Err(EvalError::InvalidCharacter(ch));
    }
    let compact: String = expr.chars().filter(|ch| !ch.is_whitespace()).collect();
    if let Some(op) = DOUBLED_OPERATORS.iter().find(|op| compact.contains(**op)) {
        return Err(EvalError::Malformed(format!("{op} is not an operator")));
    }
    let value =
        exmex::eval_str::<f64>(expr).map_err(|e| EvalError::Malformed(e.to_string()))?;
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

/// Shortest round-trip decimal form; never uses exponent notation.
pub fn format_result(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}
