use crate::render::canvas::{Rgba, RgbaBuffer};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionError {
    /// A finite source has no more frames.
    Exhausted,
    Decode { path: PathBuf, message: String },
    Io { path: PathBuf, message: String },
    Unavailable(String),
}

impl std::fmt::Display for AcquisitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcquisitionError::Exhausted => write!(f, "frame source is exhausted"),
            AcquisitionError::Decode { path, message } => {
                write!(f, "failed to decode frame {}: {message}", path.display())
            }
            AcquisitionError::Io { path, message } => {
                write!(f, "failed to read frames from {}: {message}", path.display())
            }
            AcquisitionError::Unavailable(reason) => write!(f, "frame source unavailable: {reason}"),
        }
    }
}

impl std::error::Error for AcquisitionError {}

/// Pull-based provider of raw frames.
pub trait FrameSource: Send {
    fn next_frame(&mut self) -> Result<RgbaBuffer, AcquisitionError>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Result<RgbaBuffer, AcquisitionError> {
        (**self).next_frame()
    }
}

/// Endless frames of one colour, standing in for a camera.
#[derive(Debug, Clone)]
pub struct SolidSource {
    width: u32,
    height: u32,
    color: Rgba,
}

impl SolidSource {
    pub fn new(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            color,
        }
    }
}

impl FrameSource for SolidSource {
    fn next_frame(&mut self) -> Result<RgbaBuffer, AcquisitionError> {
        Ok(RgbaBuffer::new(self.width, self.height, self.color))
    }
}

/// PNG files from a directory, in file-name order.
#[derive(Debug, Clone)]
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    next: usize,
    looping: bool,
}

impl ImageSequenceSource {
    pub fn new(paths: Vec<PathBuf>, looping: bool) -> Self {
        Self {
            paths,
            next: 0,
            looping,
        }
    }

    pub fn from_dir(dir: impl AsRef<Path>, looping: bool) -> Result<Self, AcquisitionError> {
        let dir = dir.as_ref();
        let io_err = |e: std::io::Error| AcquisitionError::Io {
            path: dir.to_path_buf(),
            message: e.to_string(),
        };
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let is_png = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("png"))
                .unwrap_or(false);
            if is_png && path.is_file() {
                paths.push(path);
            }
        }
        if paths.is_empty() {
            return Err(AcquisitionError::Unavailable(format!(
                "no PNG frames in {}",
                dir.display()
            )));
        }
        paths.sort();
        tracing::info!(count = paths.len(), dir = %dir.display(), "loaded frame sequence");
        Ok(Self::new(paths, looping))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<RgbaBuffer, AcquisitionError> {
        if self.next >= self.paths.len() {
            if !self.looping || self.paths.is_empty() {
                return Err(AcquisitionError::Exhausted);
            }
            self.next = 0;
        }
        let path = &self.paths[self.next];
        self.next += 1;
        let image = image::open(path).map_err(|e| AcquisitionError::Decode {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(RgbaBuffer::from_image(image.to_rgba8()))
    }
}
