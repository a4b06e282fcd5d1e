use crate::geometry::{Point, Rect};
use crate::render::canvas::{Rgba, RgbaBuffer};
use crate::render::glyphs::draw_text_centered;

const FILL: Rgba = Rgba::BLACK;
const FILL_HOVER: Rgba = Rgba::GREEN;
const BORDER: Rgba = Rgba::DARK_GREY;
const BORDER_WIDTH: u32 = 3;
const LABEL_COLOR: Rgba = Rgba::WHITE;
const LABEL_SCALE: u32 = 5;

/// One calculator key. Built once by the layout and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub position: Point,
    pub width: i32,
    pub height: i32,
    pub label: String,
}

impl Button {
    pub fn new(position: Point, width: i32, height: i32, label: impl Into<String>) -> Self {
        Self {
            position,
            width,
            height,
            label: label.into(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn draw(&self, canvas: &mut RgbaBuffer, hovered: bool) {
        let rect = self.rect();
        canvas.fill_rect(rect, if hovered { FILL_HOVER } else { FILL });
        canvas.stroke_rect(rect, BORDER, BORDER_WIDTH);
        draw_text_centered(canvas, &self.label, rect, LABEL_SCALE, LABEL_COLOR);
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rect().contains(x, y)
    }
}

/// First button in iteration order containing `point`.
pub fn hit_test(buttons: &[Button], point: Point) -> Option<&Button> {
    buttons.iter().find(|b| b.contains(point.x, point.y))
}
