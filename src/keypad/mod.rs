pub mod button;
pub mod layout;

pub use button::{hit_test, Button};
pub use layout::{build_layout, default_layout, LayoutError, DEFAULT_KEYS};
