pub mod detector;
pub mod sink;
pub mod source;

pub use detector::{
    DetectorConfig, HandDetector, NoHandDetector, PointerDetector, PointerHandle, PointerState,
    ScriptedDetector, SubprocessDetector,
};
pub use sink::{ChannelSink, FrameSink, NullSink, PngSequenceSink};
pub use source::{AcquisitionError, FrameSource, ImageSequenceSource, SolidSource};
