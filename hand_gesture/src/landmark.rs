//! Hand landmark data model.
//!
//! Landmarks follow the common 21-point hand model: the wrist, then four
//! joints for each digit from thumb to pinky.  Coordinates are normalized
//! to the frame (`x`, `y` in 0.0–1.0, origin top-left).

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices
// ════════════════════════════════════════════════════════════════════════════

/// Number of landmarks reported for every detected hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST:             usize = 0;
pub const THUMB_CMC:         usize = 1;
pub const THUMB_MCP:         usize = 2;
pub const THUMB_IP:          usize = 3;
pub const THUMB_TIP:         usize = 4;
pub const INDEX_FINGER_MCP:  usize = 5;
pub const INDEX_FINGER_PIP:  usize = 6;
pub const INDEX_FINGER_DIP:  usize = 7;
pub const INDEX_FINGER_TIP:  usize = 8;
pub const MIDDLE_FINGER_MCP: usize = 9;
pub const MIDDLE_FINGER_PIP: usize = 10;
pub const MIDDLE_FINGER_DIP: usize = 11;
pub const MIDDLE_FINGER_TIP: usize = 12;
pub const RING_FINGER_MCP:   usize = 13;
pub const RING_FINGER_PIP:   usize = 14;
pub const RING_FINGER_DIP:   usize = 15;
pub const RING_FINGER_TIP:   usize = 16;
pub const PINKY_MCP:         usize = 17;
pub const PINKY_PIP:         usize = 18;
pub const PINKY_DIP:         usize = 19;
pub const PINKY_TIP:         usize = 20;

/// Skeleton edges used when drawing a hand overlay.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_FINGER_MCP), (INDEX_FINGER_MCP, INDEX_FINGER_PIP),
    (INDEX_FINGER_PIP, INDEX_FINGER_DIP), (INDEX_FINGER_DIP, INDEX_FINGER_TIP),
    (INDEX_FINGER_MCP, MIDDLE_FINGER_MCP), (MIDDLE_FINGER_MCP, MIDDLE_FINGER_PIP),
    (MIDDLE_FINGER_PIP, MIDDLE_FINGER_DIP), (MIDDLE_FINGER_DIP, MIDDLE_FINGER_TIP),
    (MIDDLE_FINGER_MCP, RING_FINGER_MCP), (RING_FINGER_MCP, RING_FINGER_PIP),
    (RING_FINGER_PIP, RING_FINGER_DIP), (RING_FINGER_DIP, RING_FINGER_TIP),
    (RING_FINGER_MCP, PINKY_MCP), (WRIST, PINKY_MCP),
    (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
];

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One anatomical hand point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    /// Depth relative to the wrist; unused by the classifier.
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Landmark { x, y, z: 0.0 }
    }

    /// Position in pixel space for a `width` × `height` frame.
    pub fn to_pixels(&self, width: u32, height: u32) -> (f32, f32) {
        (self.x * width as f32, self.y * height as f32)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandSide
// ════════════════════════════════════════════════════════════════════════════

/// Which physical hand an observation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    pub const ALL: [HandSide; 2] = [HandSide::Left, HandSide::Right];

    pub fn label(self) -> &'static str {
        match self {
            HandSide::Left  => "Left",
            HandSide::Right => "Right",
        }
    }

    fn slot(self) -> usize {
        match self {
            HandSide::Left  => 0,
            HandSide::Right => 1,
        }
    }
}

impl fmt::Display for HandSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HandSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left"  => Ok(HandSide::Left),
            "right" => Ok(HandSide::Right),
            other   => Err(format!("unknown hand side {:?}", other)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PerSide: one value for each hand
// ════════════════════════════════════════════════════════════════════════════

/// A pair of values indexed by [`HandSide`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PerSide<T> {
    slots: [T; 2],
}

impl<T> PerSide<T> {
    pub fn new(left: T, right: T) -> Self {
        PerSide { slots: [left, right] }
    }

    pub fn iter(&self) -> impl Iterator<Item = (HandSide, &T)> {
        HandSide::ALL.into_iter().zip(self.slots.iter())
    }
}

impl<T: Clone> PerSide<T> {
    pub fn splat(value: T) -> Self {
        PerSide { slots: [value.clone(), value] }
    }
}

impl<T> Index<HandSide> for PerSide<T> {
    type Output = T;
    fn index(&self, side: HandSide) -> &T { &self.slots[side.slot()] }
}

impl<T> IndexMut<HandSide> for PerSide<T> {
    fn index_mut(&mut self, side: HandSide) -> &mut T { &mut self.slots[side.slot()] }
}

// ════════════════════════════════════════════════════════════════════════════
// HandObservation
// ════════════════════════════════════════════════════════════════════════════

/// All landmarks of one detected hand in one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HandObservation {
    pub side:      HandSide,
    pub landmarks: [Landmark; LANDMARK_COUNT],
    /// Detector confidence, 0.0–1.0.
    pub score:     f32,
}

impl HandObservation {
    pub fn new(side: HandSide, landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        HandObservation { side, landmarks, score: 1.0 }
    }

    /// Build from a slice; `None` unless exactly [`LANDMARK_COUNT`] points.
    pub fn from_slice(side: HandSide, points: &[Landmark], score: f32) -> Option<Self> {
        let landmarks: [Landmark; LANDMARK_COUNT] = points.try_into().ok()?;
        Some(HandObservation { side, landmarks, score })
    }

    pub fn landmark(&self, index: usize) -> Landmark {
        self.landmarks[index]
    }

    pub fn wrist(&self) -> Landmark {
        self.landmarks[WRIST]
    }

    /// Wrist position in pixels, the point the motion tracker follows.
    pub fn wrist_pixels(&self, width: u32, height: u32) -> (f32, f32) {
        self.wrist().to_pixels(width, height)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_parses_detector_labels() {
        assert_eq!("Left".parse::<HandSide>(), Ok(HandSide::Left));
        assert_eq!("right".parse::<HandSide>(), Ok(HandSide::Right));
        assert!("both".parse::<HandSide>().is_err());
    }

    #[test]
    fn per_side_indexes_independently() {
        let mut m = PerSide::splat(0);
        m[HandSide::Right] = 7;
        assert_eq!(m[HandSide::Left], 0);
        assert_eq!(m[HandSide::Right], 7);
        let collected: Vec<_> = m.iter().map(|(s, v)| (s, *v)).collect();
        assert_eq!(collected, vec![(HandSide::Left, 0), (HandSide::Right, 7)]);
    }

    #[test]
    fn from_slice_requires_full_hand() {
        let pts = vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        assert!(HandObservation::from_slice(HandSide::Left, &pts, 0.9).is_some());
        assert!(HandObservation::from_slice(HandSide::Left, &pts[..20], 0.9).is_none());
    }

    #[test]
    fn wrist_pixels_scales_by_frame() {
        let mut pts = [Landmark::default(); LANDMARK_COUNT];
        pts[WRIST] = Landmark::new(0.25, 0.5);
        let hand = HandObservation::new(HandSide::Right, pts);
        assert_eq!(hand.wrist_pixels(640, 480), (160.0, 240.0));
    }

    #[test]
    fn connections_stay_in_range() {
        assert!(HAND_CONNECTIONS.iter().all(|&(a, b)| a < LANDMARK_COUNT && b < LANDMARK_COUNT));
    }
}
