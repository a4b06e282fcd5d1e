use crate::frame::{AcquisitionError, FrameSink, FrameSource, HandDetector};
use crate::gesture::{HandLandmarks, PinchOutcome};
use crate::keypad::Button;
use crate::pipeline::session::SharedSession;
use crate::render::canvas::RgbaBuffer;
use crate::render::overlay::{draw_expression_box, draw_feedback, draw_hand_skeleton};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Paint the button under the pinch cursor in the hover colour.
    pub highlight_hover: bool,
    pub draw_landmarks: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            highlight_hover: false,
            draw_landmarks: true,
        }
    }
}

/// Per-frame work shared by every drive mode: draw the keypad and the
/// expression, interpret the hand, apply a selection and mark it.
#[derive(Debug, Clone)]
pub struct FramePipeline {
    buttons: Vec<Button>,
    session: SharedSession,
    options: PipelineOptions,
    started: Instant,
}

impl FramePipeline {
    pub fn new(buttons: Vec<Button>, session: SharedSession, options: PipelineOptions) -> Self {
        Self {
            buttons,
            session,
            options,
            started: Instant::now(),
        }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Milliseconds since the pipeline was created.
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    pub fn process(
        &self,
        frame: &mut RgbaBuffer,
        hand: Option<&HandLandmarks>,
        at_ms: u64,
    ) -> PinchOutcome {
        let mut session = self.session.lock();

        let hover = hand
            .filter(|_| self.options.highlight_hover)
            .map(|h| h.thumb_tip().midpoint(h.index_tip()));
        for button in &self.buttons {
            let hovered = hover.map_or(false, |p| button.contains(p.x, p.y));
            button.draw(frame, hovered);
        }
        draw_expression_box(frame, session.expression());

        if let Some(hand) = hand.filter(|_| self.options.draw_landmarks) {
            draw_hand_skeleton(frame, hand);
        }

        let outcome = session.handle_hand(hand, &self.buttons, at_ms);
        if let PinchOutcome::Selected { cursor, .. } = &outcome {
            draw_feedback(frame, *cursor);
        }
        outcome
    }
}

/// One processed frame and what the hand did in it.
#[derive(Debug, Clone)]
pub struct FrameResult {
    pub frame: RgbaBuffer,
    pub outcome: PinchOutcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames: u64,
    pub hands: u64,
    pub selections: u64,
}

impl RunStats {
    pub fn record(&mut self, outcome: &PinchOutcome) {
        self.frames += 1;
        if !matches!(outcome, PinchOutcome::NoHand) {
            self.hands += 1;
        }
        if matches!(outcome, PinchOutcome::Selected { .. }) {
            self.selections += 1;
        }
    }
}

/// Detects a hand, logging and swallowing detector failures.
pub(crate) fn detect_or_none(
    detector: &mut dyn HandDetector,
    frame: &RgbaBuffer,
) -> Option<HandLandmarks> {
    match detector.detect(frame) {
        Ok(hand) => hand,
        Err(e) => {
            tracing::warn!("hand detection failed: {e:#}");
            None
        }
    }
}

/// Pull-driven pipeline: owns the frame source and the detector.
pub struct FrameDriver {
    pipeline: FramePipeline,
    source: Box<dyn FrameSource>,
    detector: Box<dyn HandDetector>,
    stats: RunStats,
    frame_interval: Option<Duration>,
}

/// Minimum time between two frames for a rate of `fps`; `0` means unpaced.
pub fn frame_interval_for(fps: u32) -> Option<Duration> {
    (fps > 0).then(|| Duration::from_secs(1) / fps)
}

/// Sleeps whatever is left of `interval` since `started`.
pub(crate) fn pace(started: Instant, interval: Option<Duration>) {
    if let Some(rest) = interval.and_then(|i| i.checked_sub(started.elapsed())) {
        std::thread::sleep(rest);
    }
}

impl FrameDriver {
    pub fn new(
        pipeline: FramePipeline,
        source: Box<dyn FrameSource>,
        detector: Box<dyn HandDetector>,
    ) -> Self {
        Self {
            pipeline,
            source,
            detector,
            stats: RunStats::default(),
            frame_interval: None,
        }
    }

    /// Caps the continuous and stream loops to one frame per `interval`.
    pub fn set_frame_interval(&mut self, interval: Option<Duration>) {
        self.frame_interval = interval;
    }

    pub fn frame_interval(&self) -> Option<Duration> {
        self.frame_interval
    }

    pub fn pipeline(&self) -> &FramePipeline {
        &self.pipeline
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub(crate) fn set_stats(&mut self, stats: RunStats) {
        self.stats = stats;
    }

    pub fn into_parts(self) -> (FramePipeline, Box<dyn FrameSource>, Box<dyn HandDetector>) {
        (self.pipeline, self.source, self.detector)
    }

    /// Acquire, detect and process a single frame.
    pub fn step(&mut self) -> Result<FrameResult, AcquisitionError> {
        let mut frame = self.source.next_frame()?;
        let hand = detect_or_none(self.detector.as_mut(), &frame);
        let at_ms = self.pipeline.now_ms();
        let outcome = self.pipeline.process(&mut frame, hand.as_ref(), at_ms);
        self.stats.record(&outcome);
        Ok(FrameResult { frame, outcome })
    }

    /// Single-shot capture: `None` when no frame could be acquired.
    pub fn snapshot(&mut self) -> Option<FrameResult> {
        match self.step() {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::warn!("snapshot skipped: {e}");
                None
            }
        }
    }

    /// Blocking capture loop, paced by the frame interval. `stop` is only
    /// checked between frames; the first acquisition failure ends the loop
    /// and is returned.
    pub fn run_continuous(
        &mut self,
        sink: &mut dyn FrameSink,
        stop: &AtomicBool,
    ) -> Result<RunStats, AcquisitionError> {
        tracing::info!("continuous capture started");
        while !stop.load(Ordering::Relaxed) {
            let started = Instant::now();
            match self.step() {
                Ok(result) => {
                    sink.present(result.frame);
                    pace(started, self.frame_interval);
                }
                Err(e) => {
                    tracing::warn!(frames = self.stats.frames, "continuous capture halted: {e}");
                    return Err(e);
                }
            }
        }
        tracing::info!(frames = self.stats.frames, "continuous capture stopped");
        Ok(self.stats)
    }
}
