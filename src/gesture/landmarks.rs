//! Hand landmark indices follow the 21-point hand topology used by common
//! landmark models (wrist = 0, thumb 1-4, index 5-8, middle 9-12, ring 13-16,
//! pinky 17-20).

use crate::geometry::Point;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_FINGER_MCP: usize = 5;
pub const INDEX_FINGER_PIP: usize = 6;
pub const INDEX_FINGER_DIP: usize = 7;
pub const INDEX_FINGER_TIP: usize = 8;
pub const MIDDLE_FINGER_MCP: usize = 9;
pub const MIDDLE_FINGER_PIP: usize = 10;
pub const MIDDLE_FINGER_DIP: usize = 11;
pub const MIDDLE_FINGER_TIP: usize = 12;
pub const RING_FINGER_MCP: usize = 13;
pub const RING_FINGER_PIP: usize = 14;
pub const RING_FINGER_DIP: usize = 15;
pub const RING_FINGER_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Bones drawn by the skeleton overlay.
pub const HAND_CONNECTIONS: &[(usize, usize)] = &[
    (WRIST, THUMB_CMC),
    (THUMB_CMC, THUMB_MCP),
    (THUMB_MCP, THUMB_IP),
    (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_FINGER_MCP),
    (INDEX_FINGER_MCP, INDEX_FINGER_PIP),
    (INDEX_FINGER_PIP, INDEX_FINGER_DIP),
    (INDEX_FINGER_DIP, INDEX_FINGER_TIP),
    (INDEX_FINGER_MCP, MIDDLE_FINGER_MCP),
    (MIDDLE_FINGER_MCP, MIDDLE_FINGER_PIP),
    (MIDDLE_FINGER_PIP, MIDDLE_FINGER_DIP),
    (MIDDLE_FINGER_DIP, MIDDLE_FINGER_TIP),
    (MIDDLE_FINGER_MCP, RING_FINGER_MCP),
    (RING_FINGER_MCP, RING_FINGER_PIP),
    (RING_FINGER_PIP, RING_FINGER_DIP),
    (RING_FINGER_DIP, RING_FINGER_TIP),
    (RING_FINGER_MCP, PINKY_MCP),
    (WRIST, PINKY_MCP),
    (PINKY_MCP, PINKY_PIP),
    (PINKY_PIP, PINKY_DIP),
    (PINKY_DIP, PINKY_TIP),
];

/// One detected hand in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandLandmarks {
    points: [Point; LANDMARK_COUNT],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandmarkCountError {
    pub found: usize,
}

impl std::fmt::Display for LandmarkCountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "expected {LANDMARK_COUNT} hand landmarks, got {}", self.found)
    }
}

impl std::error::Error for LandmarkCountError {}

impl HandLandmarks {
    pub fn new(points: [Point; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Scales normalised `(x, y)` pairs to pixels, truncating toward zero.
    pub fn from_normalized(
        coords: &[(f32, f32)],
        width: u32,
        height: u32,
    ) -> Result<Self, LandmarkCountError> {
        let points: Vec<Point> = coords
            .iter()
            .map(|&(x, y)| Point::new((x * width as f32) as i32, (y * height as f32) as i32))
            .collect();
        Self::try_from(points)
    }

    pub fn point(&self, index: usize) -> Point {
        self.points[index]
    }

    pub fn points(&self) -> &[Point; LANDMARK_COUNT] {
        &self.points
    }

    pub fn thumb_tip(&self) -> Point {
        self.points[THUMB_TIP]
    }

    pub fn index_tip(&self) -> Point {
        self.points[INDEX_FINGER_TIP]
    }

    /// Plausible open hand whose index tip sits at `index_tip`, with the thumb
    /// tip `gap` pixels to its left. Used when a pointer stands in for a detector.
    pub fn synthetic(index_tip: Point, gap: i32) -> Self {
        // Offsets relative to the wrist, roughly a right hand seen palm-on.
        const SHAPE: [(i32, i32); LANDMARK_COUNT] = [
            (0, 0),
            (-30, -15),
            (-50, -40),
            (-60, -65),
            (-65, -90),
            (-20, -80),
            (-20, -110),
            (-20, -130),
            (-20, -150),
            (0, -82),
            (0, -115),
            (0, -137),
            (0, -157),
            (18, -78),
            (20, -107),
            (21, -127),
            (22, -145),
            (34, -70),
            (38, -92),
            (40, -107),
            (42, -120),
        ];
        let wrist = Point::new(
            index_tip.x.saturating_sub(SHAPE[INDEX_FINGER_TIP].0),
            index_tip.y.saturating_sub(SHAPE[INDEX_FINGER_TIP].1),
        );
        let mut points =
            SHAPE.map(|(dx, dy)| Point::new(wrist.x.saturating_add(dx), wrist.y.saturating_add(dy)));
        points[THUMB_TIP] = Point::new(index_tip.x.saturating_sub(gap), index_tip.y);
        Self { points }
    }
}

impl TryFrom<Vec<Point>> for HandLandmarks {
    type Error = LandmarkCountError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        let found = points.len();
        let points: [Point; LANDMARK_COUNT] =
            points.try_into().map_err(|_| LandmarkCountError { found })?;
        Ok(Self { points })
    }
}
