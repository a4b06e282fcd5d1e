use crate::frame::ChannelSink;
use crate::pipeline::{self, FrameDriver, FrameMode, RunReport, SharedSession};
use crate::render::RgbaBuffer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureLifecycle {
    Stopped,
    Running,
}

struct Worker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<(FrameDriver, RunReport)>,
}

/// Processed frames waiting for the UI. Older frames are dropped, not queued.
pub const FRAME_SLOTS: usize = 1;

/// Owns the frame driver while stopped and the capture thread while
/// running. Processed frames arrive on an internal channel.
pub struct CaptureController {
    mode: FrameMode,
    session: SharedSession,
    driver: Option<FrameDriver>,
    worker: Option<Worker>,
    frames_tx: SyncSender<RgbaBuffer>,
    frames_rx: Receiver<RgbaBuffer>,
    last_report: Option<RunReport>,
}

impl CaptureController {
    pub fn new(driver: FrameDriver, mode: FrameMode) -> Self {
        let (frames_tx, frames_rx) = mpsc::sync_channel(FRAME_SLOTS);
        Self {
            mode,
            session: driver.pipeline().session().clone(),
            driver: Some(driver),
            worker: None,
            frames_tx,
            frames_rx,
            last_report: None,
        }
    }

    pub fn mode(&self) -> FrameMode {
        self.mode
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn lifecycle(&self) -> CaptureLifecycle {
        if self.worker.is_some() {
            CaptureLifecycle::Running
        } else {
            CaptureLifecycle::Stopped
        }
    }

    /// Outcome of the last finished run.
    pub fn last_report(&self) -> Option<&RunReport> {
        self.last_report.as_ref()
    }

    /// Starts the capture thread. Snapshot mode has no background run, so
    /// this only succeeds for the continuous and stream modes.
    pub fn start(&mut self) -> bool {
        if self.mode == FrameMode::Snapshot || self.worker.is_some() {
            return false;
        }
        let Some(driver) = self.driver.take() else {
            return false;
        };
        let stop = Arc::new(AtomicBool::new(false));
        let mode = self.mode;
        let mut sink = ChannelSink::new(self.frames_tx.clone());
        let thread_stop = stop.clone();
        let handle = std::thread::spawn(move || pipeline::run(mode, driver, &mut sink, thread_stop));
        tracing::info!(%mode, "capture started");
        self.worker = Some(Worker { stop, handle });
        true
    }

    /// Signals the capture thread and waits for it to hand the driver back.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop.store(true, Ordering::Relaxed);
            self.reap(worker);
        }
    }

    /// Collects a capture thread that ended on its own, e.g. when the source
    /// ran out of frames.
    pub fn poll(&mut self) {
        if self.worker.as_ref().is_some_and(|w| w.handle.is_finished()) {
            if let Some(worker) = self.worker.take() {
                self.reap(worker);
            }
        }
    }

    fn reap(&mut self, worker: Worker) {
        match worker.handle.join() {
            Ok((driver, report)) => {
                match &report.halted_by {
                    Some(e) => tracing::warn!(frames = report.stats.frames, "capture halted: {e}"),
                    None => tracing::info!(frames = report.stats.frames, "capture stopped"),
                }
                self.driver = Some(driver);
                self.last_report = Some(report);
            }
            Err(_) => tracing::error!("capture thread panicked; capture disabled"),
        }
    }

    /// Processes one frame while stopped. Returns whether a frame was produced.
    pub fn snapshot(&mut self) -> bool {
        let Some(driver) = self.driver.as_mut() else {
            return false;
        };
        match driver.snapshot() {
            Some(result) => {
                // Replace whatever the UI has not picked up yet.
                while self.frames_rx.try_recv().is_ok() {}
                let _ = self.frames_tx.try_send(result.frame);
                true
            }
            None => false,
        }
    }

    /// Most recent processed frame since the last call, skipping older ones.
    pub fn latest_frame(&self) -> Option<RgbaBuffer> {
        self.frames_rx.try_iter().last()
    }
}

impl Drop for CaptureController {
    fn drop(&mut self) {
        self.stop();
    }
}
