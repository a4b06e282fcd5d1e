use crate::geometry::{Point, Rect};
use crate::render::canvas::{Rgba, RgbaBuffer};

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Blank columns between glyphs, before scaling.
const GLYPH_SPACING: u32 = 1;

const FALLBACK: &[&str] = &[
    "01110", "10001", "00001", "00010", "00100", "00000", "00100",
];

pub fn glyph_bitmap(ch: char) -> &'static [&'static str] {
    match ch {
        '0' => &["01110", "10001", "10011", "10101", "11001", "10001", "01110"],
        '1' => &["00100", "01100", "00100", "00100", "00100", "00100", "01110"],
        '2' => &["01110", "10001", "00001", "00010", "00100", "01000", "11111"],
        '3' => &["11111", "00010", "00100", "00010", "00001", "10001", "01110"],
        '4' => &["00010", "00110", "01010", "10010", "11111", "00010", "00010"],
        '5' => &["11111", "10000", "11110", "00001", "00001", "10001", "01110"],
        '6' => &["00110", "01000", "10000", "11110", "10001", "10001", "01110"],
        '7' => &["11111", "00001", "00010", "00100", "01000", "01000", "01000"],
        '8' => &["01110", "10001", "10001", "01110", "10001", "10001", "01110"],
        '9' => &["01110", "10001", "10001", "01111", "00001", "00010", "01100"],
        '+' => &["00000", "00100", "00100", "11111", "00100", "00100", "00000"],
        '-' => &["00000", "00000", "00000", "11111", "00000", "00000", "00000"],
        '*' => &["00000", "10101", "01110", "11111", "01110", "10101", "00000"],
        '/' => &["00001", "00010", "00010", "00100", "01000", "01000", "10000"],
        '=' => &["00000", "00000", "11111", "00000", "11111", "00000", "00000"],
        '.' => &["00000", "00000", "00000", "00000", "00000", "01100", "01100"],
        '(' => &["00010", "00100", "01000", "01000", "01000", "00100", "00010"],
        ')' => &["01000", "00100", "00010", "00010", "00010", "00100", "01000"],
        'C' => &["01110", "10001", "10000", "10000", "10000", "10001", "01110"],
        'E' => &["11111", "10000", "10000", "11110", "10000", "10000", "11111"],
        'r' => &["00000", "00000", "10110", "11001", "10000", "10000", "10000"],
        'o' => &["00000", "00000", "01110", "10001", "10001", "10001", "01110"],
        ' ' => &["00000", "00000", "00000", "00000", "00000", "00000", "00000"],
        _ => FALLBACK,
    }
}

/// Pixel width of `text` at `scale`, without trailing spacing.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let count = text.chars().count() as u32;
    if count == 0 {
        return 0;
    }
    (count * (GLYPH_WIDTH + GLYPH_SPACING) - GLYPH_SPACING) * scale
}

pub fn text_height(scale: u32) -> u32 {
    GLYPH_HEIGHT * scale
}

/// Draws `text` with its top-left corner at `origin`. Returns the x just past the last glyph.
pub fn draw_text(canvas: &mut RgbaBuffer, text: &str, origin: Point, scale: u32, color: Rgba) -> i32 {
    let scale = scale.max(1) as i32;
    let mut cursor_x = origin.x;
    for ch in text.chars() {
        for (row, bits) in glyph_bitmap(ch).iter().enumerate() {
            for (col, bit) in bits.bytes().enumerate() {
                if bit != b'1' {
                    continue;
                }
                canvas.fill_rect(
                    Rect::new(
                        cursor_x + col as i32 * scale,
                        origin.y + row as i32 * scale,
                        scale,
                        scale,
                    ),
                    color,
                );
            }
        }
        cursor_x += (GLYPH_WIDTH + GLYPH_SPACING) as i32 * scale;
    }
    cursor_x
}

/// Draws `text` centred inside `rect`.
pub fn draw_text_centered(canvas: &mut RgbaBuffer, text: &str, rect: Rect, scale: u32, color: Rgba) {
    let w = text_width(text, scale) as i32;
    let h = text_height(scale) as i32;
    let origin = Point::new(rect.x + (rect.width - w) / 2, rect.y + (rect.height - h) / 2);
    draw_text(canvas, text, origin, scale, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_glyph_is_five_by_seven() {
        for ch in "0123456789+-*/=.()CEro ?".chars() {
            let bitmap = glyph_bitmap(ch);
            assert_eq!(bitmap.len(), GLYPH_HEIGHT as usize, "{ch}");
            assert!(bitmap.iter().all(|row| row.len() == GLYPH_WIDTH as usize), "{ch}");
        }
    }

    #[test]
    fn width_accounts_for_spacing() {
        assert_eq!(text_width("", 3), 0);
        assert_eq!(text_width("7", 3), 15);
        assert_eq!(text_width("77", 1), 11);
    }

    #[test]
    fn minus_sign_paints_middle_row() {
        let mut canvas = RgbaBuffer::new(5, 7, Rgba::BLACK);
        draw_text(&mut canvas, "-", Point::new(0, 0), 1, Rgba::WHITE);
        assert_eq!(canvas.pixel(2, 3), Rgba::WHITE);
        assert_eq!(canvas.pixel(2, 2), Rgba::BLACK);
    }
}
