use crate::render::canvas::RgbaBuffer;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{SyncSender, TrySendError};

/// Destination for finished frames. Presentation failures are logged, not returned.
pub trait FrameSink {
    fn present(&mut self, frame: RgbaBuffer);
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn present(&mut self, frame: RgbaBuffer) {
        (**self).present(frame)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: RgbaBuffer) {}
}

/// Hands frames to another thread, typically the UI.
///
/// Never blocks: when the bounded channel is full the new frame is dropped,
/// so a receiver that stops draining holds at most the channel capacity.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: SyncSender<RgbaBuffer>,
    dropped: u64,
}

impl ChannelSink {
    pub fn new(tx: SyncSender<RgbaBuffer>) -> Self {
        Self { tx, dropped: 0 }
    }

    /// Frames discarded because the receiver was behind or gone.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl FrameSink for ChannelSink {
    fn present(&mut self, frame: RgbaBuffer) {
        match self.tx.try_send(frame) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                tracing::trace!(dropped = self.dropped, "frame receiver busy; discarding frame");
            }
            Err(TrySendError::Disconnected(_)) => {
                self.dropped += 1;
                tracing::debug!("frame receiver dropped; discarding frame");
            }
        }
    }
}

/// Writes `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    next_index: usize,
}

impl PngSequenceSink {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create output dir {}", dir.display()))?;
        Ok(Self { dir, next_index: 0 })
    }

    pub fn written(&self) -> usize {
        self.next_index
    }

    fn write(&self, frame: &RgbaBuffer) -> Result<PathBuf> {
        let path = self.dir.join(format!("frame_{:05}.png", self.next_index));
        let image = frame
            .to_image()
            .context("frame dimensions do not match its pixel buffer")?;
        image
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}

impl FrameSink for PngSequenceSink {
    fn present(&mut self, frame: RgbaBuffer) {
        match self.write(&frame) {
            Ok(path) => {
                tracing::trace!(path = %path.display(), "frame written");
                self.next_index += 1;
            }
            Err(e) => tracing::warn!("failed to save frame: {e:#}"),
        }
    }
}
