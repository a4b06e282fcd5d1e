use crate::geometry::Point;
use crate::keypad::button::Button;

pub const GRID_SIZE: usize = 4;
pub const CELL_SIZE: i32 = 80;
pub const PITCH: i32 = 100;
pub const ORIGIN: Point = Point::new(50, 150);

pub const DEFAULT_KEYS: [[&str; GRID_SIZE]; GRID_SIZE] = [
    ["7", "8", "9", "+"],
    ["4", "5", "6", "-"],
    ["1", "2", "3", "*"],
    ["C", "0", "=", "/"],
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    RowCount { found: usize },
    ColumnCount { row: usize, found: usize },
    InvalidLabel { row: usize, col: usize, label: String },
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::RowCount { found } => {
                write!(f, "keypad needs {GRID_SIZE} rows, found {found}")
            }
            LayoutError::ColumnCount { row, found } => {
                write!(f, "keypad row {row} needs {GRID_SIZE} labels, found {found}")
            }
            LayoutError::InvalidLabel { row, col, label } => {
                write!(f, "keypad label {label:?} at ({row}, {col}) must be one character")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Builds the 16 buttons row-major: button `(row, col)` sits at
/// `(col * PITCH + ORIGIN.x, row * PITCH + ORIGIN.y)`.
pub fn build_layout<R, S>(rows: &[R]) -> Result<Vec<Button>, LayoutError>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    if rows.len() != GRID_SIZE {
        return Err(LayoutError::RowCount { found: rows.len() });
    }
    let mut buttons = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
    for (row, labels) in rows.iter().enumerate() {
        let labels = labels.as_ref();
        if labels.len() != GRID_SIZE {
            return Err(LayoutError::ColumnCount {
                row,
                found: labels.len(),
            });
        }
        for (col, label) in labels.iter().enumerate() {
            let label = label.as_ref();
            if label.chars().count() != 1 {
                return Err(LayoutError::InvalidLabel {
                    row,
                    col,
                    label: label.to_string(),
                });
            }
            let position = Point::new(
                col as i32 * PITCH + ORIGIN.x,
                row as i32 * PITCH + ORIGIN.y,
            );
            buttons.push(Button::new(position, CELL_SIZE, CELL_SIZE, label));
        }
    }
    Ok(buttons)
}

pub fn default_layout() -> Vec<Button> {
    // The default table is 4x4 single characters, so this cannot fail.
    build_layout(&DEFAULT_KEYS).unwrap_or_default()
}
