pub mod capture;
pub mod frame_view;

pub use capture::{CaptureController, CaptureLifecycle};
pub use frame_view::{FrameInput, FrameView};

use crate::calc::CLEAR;
use crate::frame::{PointerHandle, PointerState};
use crate::pipeline::FrameMode;
use eframe::egui;

pub struct GestureCalcApp {
    capture: CaptureController,
    pointer: PointerHandle,
    view: FrameView,
    history_display: usize,
    run_requested: bool,
}

impl GestureCalcApp {
    /// `pointer` must be the handle the driver's detector reads, if it uses one.
    pub fn new(capture: CaptureController, pointer: PointerHandle, history_display: usize) -> Self {
        Self {
            capture,
            pointer,
            view: FrameView::default(),
            history_display,
            run_requested: false,
        }
    }

    pub fn capture(&self) -> &CaptureController {
        &self.capture
    }

    /// Places the pointer, then processes one frame while stopped, so the
    /// detector sees the pointer where the user triggered the snapshot.
    pub fn snapshot_with_pointer(&mut self, state: PointerState) -> bool {
        self.pointer.set(state);
        let produced = self.capture.snapshot();
        if !produced {
            tracing::debug!("snapshot produced no frame");
        }
        produced
    }

    /// Clicking the frame or pressing Space while stopped pinches at the
    /// pointer and takes a snapshot there.
    fn snapshot_trigger(&self, ctx: &egui::Context, input: FrameInput) -> Option<PointerState> {
        if self.capture.lifecycle() != CaptureLifecycle::Stopped {
            return None;
        }
        let space = ctx.input(|i| i.key_pressed(egui::Key::Space));
        let position = input.pointer.position?;
        (input.clicked || space).then_some(PointerState {
            position: Some(position),
            pressed: true,
        })
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let mode = self.capture.mode();
        ui.horizontal(|ui| {
            ui.label(format!("Mode: {mode}"));
            if mode != FrameMode::Snapshot {
                ui.checkbox(&mut self.run_requested, "Run");
            }
            let stopped = self.capture.lifecycle() == CaptureLifecycle::Stopped;
            if ui
                .add_enabled(stopped, egui::Button::new("Snapshot"))
                .on_hover_text("Click the frame or press Space to pinch at the pointer")
                .clicked()
            {
                self.snapshot_with_pointer(PointerState::default());
            }
            if ui.button("Clear").clicked() {
                self.capture.session().lock().press(CLEAR);
            }
        });

        match (self.run_requested, self.capture.lifecycle()) {
            (true, CaptureLifecycle::Stopped) => {
                if !self.capture.start() {
                    self.run_requested = false;
                }
            }
            (false, CaptureLifecycle::Running) => self.capture.stop(),
            _ => {}
        }

        if let Some(report) = self.capture.last_report() {
            if let Some(err) = &report.halted_by {
                ui.colored_label(egui::Color32::RED, format!("Capture halted: {err}"));
            }
        }
    }

    fn session_panel(&self, ui: &mut egui::Ui) {
        let view = self.capture.session().view(self.history_display);
        ui.heading("Expression");
        ui.monospace(if view.expression.is_empty() { " " } else { view.expression.as_str() });
        ui.separator();
        ui.heading("History");
        if view.history.is_empty() {
            ui.label("No calculations yet");
        }
        for entry in &view.history {
            ui.monospace(format!("{} = {}", entry.expr, entry.result));
        }
    }
}

impl eframe::App for GestureCalcApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.capture.poll();
        if self.capture.lifecycle() == CaptureLifecycle::Stopped {
            self.run_requested = false;
        }
        if let Some(frame) = self.capture.latest_frame() {
            self.view.set_frame(ctx, &frame);
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));
        egui::SidePanel::right("session")
            .min_width(200.0)
            .show(ctx, |ui| self.session_panel(ui));
        let input = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let input = self.view.ui(ui).unwrap_or_default();
                if !self.view.has_frame() {
                    ui.label("No frame yet. Start the capture or take a snapshot.");
                }
                input
            })
            .inner;
        self.pointer.set(input.pointer);
        if let Some(state) = self.snapshot_trigger(ctx, input) {
            self.snapshot_with_pointer(state);
            ctx.request_repaint();
        }

        if self.capture.lifecycle() == CaptureLifecycle::Running {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.pointer.set(PointerState::default());
        self.capture.stop();
    }
}
