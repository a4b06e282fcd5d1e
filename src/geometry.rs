use serde::{Deserialize, Serialize};

/// Integer pixel coordinate in the frame's native resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }

    /// Midpoint with each coordinate floored, so `(1, 0)` and `(2, 0)` give `(1, 0)`.
    /// Exact over the whole `i32` range.
    pub fn midpoint(self, other: Point) -> Point {
        let half = |a: i32, b: i32| (i64::from(a) + i64::from(b)).div_euclid(2) as i32;
        Point {
            x: half(self.x, other.x),
            y: half(self.y, other.y),
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from(value: (i32, i32)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_corners(a: Point, b: Point) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        Self {
            x: min_x,
            y: min_y,
            width: a.x.max(b.x) - min_x,
            height: a.y.max(b.y) - min_y,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Strict interior test: points on the edge are outside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.x < x && x < self.right() && self.y < y && y < self.bottom()
    }

    /// True when the two rectangles share interior area.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Intersection with a `width` x `height` canvas, `None` when fully outside.
    pub fn clamp(self, width: u32, height: u32) -> Option<Rect> {
        let max_w = width as i32;
        let max_h = height as i32;
        let x0 = self.x.clamp(0, max_w);
        let y0 = self.y.clamp(0, max_h);
        let x1 = self.right().clamp(0, max_w);
        let y1 = self.bottom().clamp(0, max_h);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect};

    #[test]
    fn midpoint_floors_negative_halves() {
        let a = Point::new(-3, 1);
        let b = Point::new(0, 2);
        assert_eq!(a.midpoint(b), Point::new(-2, 1));
    }

    #[test]
    fn midpoint_of_extreme_coordinates_does_not_overflow() {
        let far = Point::new(2_000_000_000, -2_000_000_000);
        assert_eq!(far.midpoint(far), far);

        let max = Point::new(i32::MAX, i32::MAX);
        let min = Point::new(i32::MIN, i32::MIN);
        assert_eq!(max.midpoint(max), max);
        assert_eq!(max.midpoint(min), Point::new(-1, -1));
    }

    #[test]
    fn rect_edges_saturate() {
        let r = Rect::new(i32::MAX - 5, 0, 80, 80);
        assert_eq!(r.right(), i32::MAX);
        assert!(!r.contains(0, 40));
        assert_eq!(r.clamp(640, 480), None);
    }

    #[test]
    fn clamp_drops_offscreen_rects() {
        assert_eq!(Rect::new(-20, -20, 10, 10).clamp(100, 100), None);
        assert_eq!(
            Rect::new(90, -5, 20, 20).clamp(100, 100),
            Some(Rect::new(90, 0, 10, 15))
        );
    }

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Rect::new(9, 9, 5, 5)));
    }
}
