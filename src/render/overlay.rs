use crate::geometry::{Point, Rect};
use crate::gesture::landmarks::{HandLandmarks, HAND_CONNECTIONS};
use crate::render::canvas::{Rgba, RgbaBuffer};
use crate::render::glyphs::{draw_text, text_height, text_width};

pub const EXPRESSION_BOX: Rect = Rect::new(50, 50, 400, 80);
const EXPRESSION_PADDING_X: i32 = 10;
const EXPRESSION_SCALE: u32 = 6;
const EXPRESSION_COLOR: Rgba = Rgba::YELLOW;

pub const FEEDBACK_RADIUS: u32 = 15;
const FEEDBACK_COLOR: Rgba = Rgba::YELLOW;

const SKELETON_BONE: Rgba = Rgba::WHITE;
const SKELETON_JOINT: Rgba = Rgba::RED;
const SKELETON_JOINT_RADIUS: u32 = 3;

/// Black box with the expression in it. Text that would overflow keeps its tail.
pub fn draw_expression_box(canvas: &mut RgbaBuffer, expression: &str) {
    canvas.fill_rect(EXPRESSION_BOX, Rgba::BLACK);
    let visible = visible_tail(expression, EXPRESSION_BOX.width - 2 * EXPRESSION_PADDING_X);
    let origin = Point::new(
        EXPRESSION_BOX.x + EXPRESSION_PADDING_X,
        EXPRESSION_BOX.y + (EXPRESSION_BOX.height - text_height(EXPRESSION_SCALE) as i32) / 2,
    );
    draw_text(canvas, visible, origin, EXPRESSION_SCALE, EXPRESSION_COLOR);
}

fn visible_tail(text: &str, max_width: i32) -> &str {
    for (idx, _) in text.char_indices() {
        if text_width(&text[idx..], EXPRESSION_SCALE) as i32 <= max_width {
            return &text[idx..];
        }
    }
    ""
}

pub fn draw_feedback(canvas: &mut RgbaBuffer, cursor: Point) {
    canvas.fill_circle(cursor, FEEDBACK_RADIUS, FEEDBACK_COLOR);
}

pub fn draw_hand_skeleton(canvas: &mut RgbaBuffer, hand: &HandLandmarks) {
    for &(a, b) in HAND_CONNECTIONS {
        canvas.draw_line(hand.point(a), hand.point(b), SKELETON_BONE, 2);
    }
    for point in hand.points() {
        canvas.fill_circle(*point, SKELETON_JOINT_RADIUS, SKELETON_JOINT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_expression_keeps_newest_characters() {
        let text = "1234567890123456";
        let tail = visible_tail(text, 380);
        assert!(text.ends_with(tail));
        assert!(tail.len() < text.len());
        assert!(text_width(tail, EXPRESSION_SCALE) as i32 <= 380);
    }

    #[test]
    fn expression_box_is_painted_black() {
        let mut canvas = RgbaBuffer::new(500, 200, Rgba::WHITE);
        draw_expression_box(&mut canvas, "");
        assert_eq!(canvas.pixel(51, 51), Rgba::BLACK);
        assert_eq!(canvas.pixel(449, 129), Rgba::BLACK);
        assert_eq!(canvas.pixel(450, 130), Rgba::WHITE);
    }
}
