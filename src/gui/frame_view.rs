use crate::frame::PointerState;
use crate::geometry::Point;
use crate::render::RgbaBuffer;
use eframe::egui::{self, Color32, Pos2, Rect, Sense, TextureOptions};

/// What the pointer did over the frame this UI pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub pointer: PointerState,
    /// Primary click released over the frame.
    pub clicked: bool,
}

/// Shows the latest processed frame and reports the pointer in frame
/// coordinates.
#[derive(Default)]
pub struct FrameView {
    texture: Option<egui::TextureHandle>,
    size: [usize; 2],
}

impl FrameView {
    pub fn has_frame(&self) -> bool {
        self.texture.is_some()
    }

    pub fn set_frame(&mut self, ctx: &egui::Context, frame: &RgbaBuffer) {
        if frame.width == 0 || frame.height == 0 {
            return;
        }
        let size = [frame.width as usize, frame.height as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, &frame.pixels);
        if let Some(texture) = self.texture.as_mut() {
            texture.set(image, TextureOptions::LINEAR);
        } else {
            self.texture = Some(ctx.load_texture("frame", image, TextureOptions::LINEAR));
        }
        self.size = size;
    }

    /// Draws the frame scaled to the available space. Returns the pointer
    /// input over the image, `None` while there is nothing to show.
    pub fn ui(&self, ui: &mut egui::Ui) -> Option<FrameInput> {
        let texture = self.texture.as_ref()?;
        let frame_size = egui::vec2(self.size[0] as f32, self.size[1] as f32);
        let available = ui.available_size();
        let scale = (available.x / frame_size.x)
            .min(available.y / frame_size.y)
            .max(0.1);

        let (response, painter) = ui.allocate_painter(frame_size * scale, Sense::click_and_drag());
        painter.image(
            texture.id(),
            response.rect,
            Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );

        let position = response
            .hover_pos()
            .or_else(|| response.interact_pointer_pos())
            .and_then(|pos| to_frame_coords(pos, response.rect, self.size));
        Some(FrameInput {
            pointer: PointerState {
                position,
                pressed: position.is_some() && response.is_pointer_button_down_on(),
            },
            clicked: position.is_some() && response.clicked(),
        })
    }
}

/// Maps a screen position inside `rect` to pixel coordinates of a frame of
/// `frame_size` stretched over it.
pub fn to_frame_coords(pos: Pos2, rect: Rect, frame_size: [usize; 2]) -> Option<Point> {
    if !rect.contains(pos) || rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let x = (pos.x - rect.min.x) / rect.width() * frame_size[0] as f32;
    let y = (pos.y - rect.min.y) / rect.height() * frame_size[1] as f32;
    Some(Point::new(x as i32, y as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_scaled_positions() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), egui::vec2(320.0, 240.0));
        let p = to_frame_coords(Pos2::new(170.0, 140.0), rect, [640, 480]);
        assert_eq!(p, Some(Point::new(320, 240)));
        assert_eq!(to_frame_coords(Pos2::new(10.0, 20.0), rect, [640, 480]), Some(Point::new(0, 0)));
    }

    #[test]
    fn outside_positions_are_dropped() {
        let rect = Rect::from_min_size(Pos2::new(0.0, 0.0), egui::vec2(100.0, 100.0));
        assert_eq!(to_frame_coords(Pos2::new(-1.0, 50.0), rect, [640, 480]), None);
        assert_eq!(to_frame_coords(Pos2::new(50.0, 101.0), rect, [640, 480]), None);
    }
}
