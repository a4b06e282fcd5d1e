pub mod calc;
pub mod frame;
pub mod geometry;
pub mod gesture;
pub mod gui;
pub mod keypad;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod settings;

use crate::frame::{
    FrameSource, HandDetector, ImageSequenceSource, PointerDetector, PointerHandle,
    ScriptedDetector, SolidSource, SubprocessDetector,
};
use crate::pipeline::{frame_interval_for, FrameDriver, FramePipeline, Session, SharedSession};
use crate::render::Rgba;
use crate::settings::{DetectorKind, Settings};
use anyhow::Context;

/// Frame source described by `settings`: the PNG directory when one is set,
/// otherwise a black backdrop of the configured size.
pub fn build_source(settings: &Settings) -> anyhow::Result<Box<dyn FrameSource>> {
    match &settings.frame_dir {
        Some(dir) => {
            let source = ImageSequenceSource::from_dir(dir, settings.loop_frames)
                .with_context(|| format!("cannot read frames from {}", dir.display()))?;
            tracing::info!(frames = source.len(), dir = %dir.display(), "using image sequence");
            Ok(Box::new(source))
        }
        None => Ok(Box::new(SolidSource::new(
            settings.frame_width,
            settings.frame_height,
            Rgba::BLACK,
        ))),
    }
}

/// Hand detector described by `settings`. `pointer` feeds the pointer
/// detector and is ignored by the others.
pub fn build_detector(
    settings: &Settings,
    pointer: PointerHandle,
) -> anyhow::Result<Box<dyn HandDetector>> {
    let detector = &settings.detector;
    Ok(match detector.kind {
        DetectorKind::Pointer => Box::new(PointerDetector::new(pointer)),
        DetectorKind::Subprocess => {
            let command = detector
                .command
                .as_deref()
                .context("subprocess detector needs a command")?;
            Box::new(SubprocessDetector::spawn(command, &detector.args, detector.config())?)
        }
        DetectorKind::Scripted => {
            let script = detector
                .script
                .as_ref()
                .context("scripted detector needs a script path")?;
            Box::new(ScriptedDetector::from_path(script)?)
        }
    })
}

/// Wires keypad, session, source and detector into a ready driver.
pub fn build_driver(settings: &Settings, pointer: PointerHandle) -> anyhow::Result<FrameDriver> {
    let buttons = settings.buttons()?;
    let session = SharedSession::new(Session::new(settings.gesture_config()));
    let pipeline = FramePipeline::new(buttons, session, settings.pipeline_options());
    let source = build_source(settings)?;
    let detector = build_detector(settings, pointer)?;
    let mut driver = FrameDriver::new(pipeline, source, detector);
    driver.set_frame_interval(frame_interval_for(settings.max_fps));
    Ok(driver)
}
