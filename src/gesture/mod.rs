pub mod gate;
pub mod interpreter;
pub mod landmarks;

pub use gate::ClickGate;
pub use interpreter::{GestureConfig, GestureInterpreter, PinchOutcome};
pub use landmarks::HandLandmarks;
