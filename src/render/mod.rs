pub mod canvas;
pub mod glyphs;
pub mod overlay;

pub use canvas::{Rgba, RgbaBuffer};
