pub mod driver;
pub mod session;
pub mod stream;

pub use driver::{frame_interval_for, FrameDriver, FramePipeline, FrameResult, PipelineOptions, RunStats};
pub use session::{Session, SessionView, SharedSession};
pub use stream::{pump_stream, spawn_frame_producer, StreamProcessor};

use crate::frame::{AcquisitionError, FrameSink, FrameSource, SolidSource};
use crate::render::Rgba;
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// How frames reach the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameMode {
    /// Blocking capture loop until stopped.
    #[default]
    Continuous,
    /// One frame per trigger.
    Snapshot,
    /// Frames pushed from a producer thread into a per-frame callback.
    Stream,
}

impl std::fmt::Display for FrameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameMode::Continuous => write!(f, "continuous"),
            FrameMode::Snapshot => write!(f, "snapshot"),
            FrameMode::Stream => write!(f, "stream"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub stats: RunStats,
    /// Acquisition failure that ended the run, if any.
    pub halted_by: Option<AcquisitionError>,
}

/// Runs `driver` in `mode` and hands it back afterwards.
///
/// Snapshot mode processes one frame; the other modes run until `stop` is
/// set or the source fails.
pub fn run(
    mode: FrameMode,
    mut driver: FrameDriver,
    sink: &mut dyn FrameSink,
    stop: Arc<AtomicBool>,
) -> (FrameDriver, RunReport) {
    match mode {
        FrameMode::Continuous => {
            let halted_by = driver.run_continuous(sink, &stop).err();
            let stats = driver.stats();
            (driver, RunReport { stats, halted_by })
        }
        FrameMode::Snapshot => {
            let halted_by = match driver.step() {
                Ok(result) => {
                    sink.present(result.frame);
                    None
                }
                Err(e) => {
                    tracing::warn!("snapshot skipped: {e}");
                    Some(e)
                }
            };
            let stats = driver.stats();
            (driver, RunReport { stats, halted_by })
        }
        FrameMode::Stream => {
            let previous = driver.stats();
            let interval = driver.frame_interval();
            let (pipeline, source, detector) = driver.into_parts();
            let (frames, producer) = spawn_frame_producer(source, stop, interval);
            let mut processor = StreamProcessor::new(pipeline, detector);
            pump_stream(&mut processor, frames, sink);

            let mut stats = processor.stats();
            stats.frames += previous.frames;
            stats.hands += previous.hands;
            stats.selections += previous.selections;

            let (pipeline, detector) = processor.into_parts();
            let (source, halted_by) = match producer.join() {
                Ok(result) => result,
                Err(_) => {
                    tracing::error!("frame producer thread panicked");
                    let source: Box<dyn FrameSource> = Box::new(SolidSource::new(0, 0, Rgba::BLACK));
                    (
                        source,
                        Some(AcquisitionError::Unavailable("frame producer panicked".into())),
                    )
                }
            };
            let mut driver = FrameDriver::new(pipeline, source, detector);
            driver.set_stats(stats);
            driver.set_frame_interval(interval);
            (driver, RunReport { stats, halted_by })
        }
    }
}
