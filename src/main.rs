use gesture_calc::frame::{AcquisitionError, FrameSink, NullSink, PngSequenceSink, PointerHandle};
use gesture_calc::gui::{CaptureController, GestureCalcApp};
use gesture_calc::pipeline::{self, FrameMode};
use gesture_calc::settings::Settings;
use gesture_calc::{build_driver, logging};

use anyhow::Context;
use eframe::egui;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

const DEFAULT_SETTINGS: &str = "gesture_calc.json";

fn main() -> anyhow::Result<()> {
    let mut settings_path = DEFAULT_SETTINGS.to_string();
    let mut headless = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--headless" => headless = true,
            _ => settings_path = arg,
        }
    }

    let settings = Settings::load(&settings_path)
        .with_context(|| format!("failed to load settings from {settings_path}"))?;
    logging::init(settings.debug_logging, settings.log_file.clone());
    settings.validate()?;
    tracing::info!(settings = %settings_path, mode = %settings.frame_mode, headless, "starting");

    if headless {
        run_headless(&settings)
    } else {
        run_gui(settings)
    }
}

fn run_headless(settings: &Settings) -> anyhow::Result<()> {
    let driver = build_driver(settings, PointerHandle::default())?;
    let session = driver.pipeline().session().clone();

    let mut sink: Box<dyn FrameSink> = match &settings.output_dir {
        Some(dir) => Box::new(PngSequenceSink::new(dir)?),
        None => Box::new(NullSink),
    };
    let stop = Arc::new(AtomicBool::new(false));
    if settings.frame_mode != FrameMode::Snapshot && settings.frame_dir.is_none() {
        tracing::warn!("no frame directory set; headless capture runs until killed");
    }
    let (_driver, report) = pipeline::run(settings.frame_mode, driver, sink.as_mut(), stop);

    tracing::info!(
        frames = report.stats.frames,
        hands = report.stats.hands,
        selections = report.stats.selections,
        "headless run finished"
    );
    match report.halted_by {
        None | Some(AcquisitionError::Exhausted) => {}
        Some(e) => return Err(e).context("frame acquisition failed"),
    }

    let session = session.lock();
    println!("{}", serde_json::to_string_pretty(session.calculator().history())?);
    Ok(())
}

fn run_gui(settings: Settings) -> anyhow::Result<()> {
    let pointer = PointerHandle::default();
    let driver = build_driver(&settings, pointer.clone())?;
    let capture = CaptureController::new(driver, settings.frame_mode);
    let app = GestureCalcApp::new(capture, pointer, settings.history_display);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Gesture Calculator",
        native_options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
