use crate::frame::{AcquisitionError, FrameSink, FrameSource, HandDetector};
use crate::pipeline::driver::{detect_or_none, pace, FramePipeline, RunStats};
use crate::render::canvas::RgbaBuffer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Frames waiting for the processor before the producer blocks.
const STREAM_BACKLOG: usize = 2;

/// Push-driven pipeline: each call to [`StreamProcessor::recv`] handles
/// exactly one frame delivered by the video stream.
pub struct StreamProcessor {
    pipeline: FramePipeline,
    detector: Box<dyn HandDetector>,
    stats: RunStats,
}

impl StreamProcessor {
    pub fn new(pipeline: FramePipeline, detector: Box<dyn HandDetector>) -> Self {
        Self {
            pipeline,
            detector,
            stats: RunStats::default(),
        }
    }

    pub fn recv(&mut self, mut frame: RgbaBuffer) -> RgbaBuffer {
        let hand = detect_or_none(self.detector.as_mut(), &frame);
        let at_ms = self.pipeline.now_ms();
        let outcome = self.pipeline.process(&mut frame, hand.as_ref(), at_ms);
        self.stats.record(&outcome);
        frame
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn into_parts(self) -> (FramePipeline, Box<dyn HandDetector>) {
        (self.pipeline, self.detector)
    }
}

/// Result of a producer thread: the source handed back plus the failure
/// that ended it, if any.
pub type ProducerResult = (Box<dyn FrameSource>, Option<AcquisitionError>);

/// Pulls frames from `source` on its own thread until `stop` is set, the
/// receiver hangs up, or acquisition fails. With an `interval` the producer
/// emits at most one frame per interval.
pub fn spawn_frame_producer(
    mut source: Box<dyn FrameSource>,
    stop: Arc<AtomicBool>,
    interval: Option<Duration>,
) -> (Receiver<RgbaBuffer>, JoinHandle<ProducerResult>) {
    let (tx, rx) = mpsc::sync_channel(STREAM_BACKLOG);
    let handle = thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            let started = Instant::now();
            match source.next_frame() {
                Ok(frame) => {
                    if tx.send(frame).is_err() {
                        break;
                    }
                    pace(started, interval);
                }
                Err(e) => {
                    tracing::warn!("frame stream ended: {e}");
                    return (source, Some(e));
                }
            }
        }
        (source, None)
    });
    (rx, handle)
}

/// Feeds every received frame through `processor` into `sink` until the
/// producer side closes.
pub fn pump_stream(processor: &mut StreamProcessor, frames: Receiver<RgbaBuffer>, sink: &mut dyn FrameSink) {
    for frame in frames {
        let out = processor.recv(frame);
        sink.present(out);
    }
}
