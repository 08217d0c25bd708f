//! Coarse gesture classification from fingertip distances.
//!
//! All distances are measured in pixel space, so thresholds scale with the
//! frame height rather than with the normalized landmark coordinates.

use std::fmt;

use crate::landmark::{
    HandObservation, Landmark, WRIST, THUMB_TIP, INDEX_FINGER_TIP,
    MIDDLE_FINGER_TIP, RING_FINGER_TIP, PINKY_TIP,
};

// ════════════════════════════════════════════════════════════════════════════
// Distance utility
// ════════════════════════════════════════════════════════════════════════════

/// Euclidean distance between two landmarks in a `width` × `height` frame.
pub fn distance(a: Landmark, b: Landmark, width: u32, height: u32) -> f32 {
    let dx = (a.x - b.x) * width as f32;
    let dy = (a.y - b.y) * height as f32;
    (dx * dx + dy * dy).sqrt()
}

// ════════════════════════════════════════════════════════════════════════════
// Gesture
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    FistClosed,
    HandOpened,
    /// No observation for that side in the current frame.
    NoHand,
}

impl Gesture {
    pub fn label(self) -> &'static str {
        match self {
            Gesture::FistClosed => "Fist Closed",
            Gesture::HandOpened => "Hand Opened",
            Gesture::NoHand     => "No Hand",
        }
    }
}

impl Default for Gesture {
    fn default() -> Self { Gesture::NoHand }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Thresholds
// ════════════════════════════════════════════════════════════════════════════

/// Thresholds expressed as fractions of the frame height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureThresholds {
    pub fist_ratio: f32,
    pub open_ratio: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        GestureThresholds { fist_ratio: 0.2, open_ratio: 0.3 }
    }
}

impl GestureThresholds {
    pub fn fist_threshold(&self, height: u32) -> f32 { self.fist_ratio * height as f32 }
    pub fn open_threshold(&self, height: u32) -> f32 { self.open_ratio * height as f32 }
}

// ════════════════════════════════════════════════════════════════════════════
// HandMetrics
// ════════════════════════════════════════════════════════════════════════════

/// The nine pixel distances the classifier looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandMetrics {
    pub thumb_wrist:  f32,
    pub index_wrist:  f32,
    pub middle_wrist: f32,
    pub ring_wrist:   f32,
    pub pinky_wrist:  f32,
    pub thumb_index:  f32,
    pub index_middle: f32,
    pub middle_ring:  f32,
    pub ring_pinky:   f32,
}

impl HandMetrics {
    pub fn measure(hand: &HandObservation, width: u32, height: u32) -> Self {
        let p = |i| hand.landmark(i);
        let d = |a, b| distance(p(a), p(b), width, height);
        HandMetrics {
            thumb_wrist:  d(WRIST, THUMB_TIP),
            index_wrist:  d(WRIST, INDEX_FINGER_TIP),
            middle_wrist: d(WRIST, MIDDLE_FINGER_TIP),
            ring_wrist:   d(WRIST, RING_FINGER_TIP),
            pinky_wrist:  d(WRIST, PINKY_TIP),
            thumb_index:  d(THUMB_TIP, INDEX_FINGER_TIP),
            index_middle: d(INDEX_FINGER_TIP, MIDDLE_FINGER_TIP),
            middle_ring:  d(MIDDLE_FINGER_TIP, RING_FINGER_TIP),
            ring_pinky:   d(RING_FINGER_TIP, PINKY_TIP),
        }
    }

    /// Four fingertips curled to the wrist and thumb pressed on the index.
    /// Thumb-to-wrist distance is not checked.
    pub fn is_fist(&self, threshold: f32) -> bool {
        self.index_wrist  < threshold
            && self.middle_wrist < threshold
            && self.ring_wrist   < threshold
            && self.pinky_wrist  < threshold
            && self.thumb_index  < threshold
    }

    /// Fingers extended and spread apart.
    pub fn is_spread(&self, threshold: f32) -> bool {
        self.index_wrist  > threshold
            && self.middle_wrist > threshold
            && self.ring_wrist   > threshold
            && self.pinky_wrist  > threshold
            && self.thumb_index  > threshold
            && self.index_middle > threshold
            && self.middle_ring  > threshold
            && self.ring_pinky   > threshold
    }
}

// ════════════════════════════════════════════════════════════════════════════
// classify
// ════════════════════════════════════════════════════════════════════════════

/// Classify with the default thresholds.
pub fn classify(hand: &HandObservation, width: u32, height: u32) -> Gesture {
    classify_with(hand, width, height, &GestureThresholds::default())
}

/// Classify one hand.
///
/// Only the fist is a real discriminant.  The spread test is computed and
/// traced, but every non-fist pose is reported as [`Gesture::HandOpened`].
pub fn classify_with(
    hand:       &HandObservation,
    width:      u32,
    height:     u32,
    thresholds: &GestureThresholds,
) -> Gesture {
    let metrics = HandMetrics::measure(hand, width, height);
    log::trace!("{} hand metrics: {:?}", hand.side, metrics);

    if metrics.is_fist(thresholds.fist_threshold(height)) {
        return Gesture::FistClosed;
    }

    let spread = metrics.is_spread(thresholds.open_threshold(height));
    log::trace!("{} hand spread check: {}", hand.side, spread);
    Gesture::HandOpened
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{HandSide, LANDMARK_COUNT};
    use crate::synth;

    const W: u32 = 640;
    const H: u32 = 480;

    fn hand_with_tips(wrist: (f32, f32), tips: [(f32, f32); 5]) -> HandObservation {
        let mut pts = [Landmark::new(wrist.0, wrist.1); LANDMARK_COUNT];
        for (idx, (x, y)) in [THUMB_TIP, INDEX_FINGER_TIP, MIDDLE_FINGER_TIP, RING_FINGER_TIP, PINKY_TIP]
            .into_iter()
            .zip(tips)
        {
            pts[idx] = Landmark::new(x, y);
        }
        HandObservation::new(HandSide::Right, pts)
    }

    #[test]
    fn identical_points_have_zero_distance() {
        let p = Landmark::new(0.42, 0.17);
        assert_eq!(distance(p, p, W, H), 0.0);
    }

    #[test]
    fn distance_is_measured_in_pixels() {
        let a = Landmark::new(0.0, 0.0);
        let b = Landmark::new(0.3, 0.4);
        // (192, 192) px apart
        let d = distance(a, b, W, H);
        assert!((d - (192.0f32 * 192.0 * 2.0).sqrt()).abs() < 1e-3);
    }

    #[test]
    fn synthetic_fist_is_fist() {
        let hand = synth::fist(HandSide::Left, (0.5, 0.5));
        assert_eq!(classify(&hand, W, H), Gesture::FistClosed);
    }

    #[test]
    fn clearly_open_hand_falls_back_to_opened() {
        let hand = synth::open_hand(HandSide::Left, (0.5, 0.8));
        let m = HandMetrics::measure(&hand, W, H);
        assert!(m.index_wrist > GestureThresholds::default().open_threshold(H));
        assert_eq!(classify(&hand, W, H), Gesture::HandOpened);
    }

    #[test]
    fn ambiguous_pose_also_falls_back_to_opened() {
        // Fingers half-curled: neither fist nor spread.
        let hand = hand_with_tips((0.5, 0.5), [
            (0.52, 0.40), (0.50, 0.25), (0.50, 0.25), (0.50, 0.25), (0.50, 0.25),
        ]);
        let m = HandMetrics::measure(&hand, W, H);
        assert!(!m.is_fist(GestureThresholds::default().fist_threshold(H)));
        assert!(!m.is_spread(GestureThresholds::default().open_threshold(H)));
        assert_eq!(classify(&hand, W, H), Gesture::HandOpened);
    }

    #[test]
    fn thumb_far_from_wrist_does_not_prevent_fist() {
        // Thumb tip far from the wrist but touching the index tip.
        let hand = hand_with_tips((0.5, 0.5), [
            (0.5, 0.75), (0.5, 0.68), (0.5, 0.55), (0.5, 0.55), (0.5, 0.55),
        ]);
        let m = HandMetrics::measure(&hand, W, H);
        assert!(m.thumb_wrist > 0.2 * H as f32);
        assert_eq!(classify(&hand, W, H), Gesture::FistClosed);
    }

    #[test]
    fn one_finger_out_breaks_fist() {
        let hand = hand_with_tips((0.5, 0.5), [
            (0.5, 0.55), (0.5, 0.55), (0.5, 0.55), (0.5, 0.55), (0.5, 0.05),
        ]);
        assert_eq!(classify(&hand, W, H), Gesture::HandOpened);
    }

    #[test]
    fn fist_threshold_is_strict() {
        // Index tip exactly on the threshold: 0.25 * 480 = 120 px.
        let hand = hand_with_tips((0.5, 0.5), [
            (0.5, 0.5), (0.5, 0.75), (0.5, 0.5), (0.5, 0.5), (0.5, 0.5),
        ]);
        let thresholds = GestureThresholds { fist_ratio: 0.25, open_ratio: 0.3 };
        let m = HandMetrics::measure(&hand, W, H);
        assert_eq!(m.index_wrist, thresholds.fist_threshold(H));
        assert_eq!(classify_with(&hand, W, H, &thresholds), Gesture::HandOpened);
    }

    #[test]
    fn thresholds_follow_frame_height() {
        let hand = synth::fist(HandSide::Right, (0.5, 0.5));
        // Same normalized pose on a tiny frame: every distance shrinks too.
        assert_eq!(classify(&hand, 64, 48), Gesture::FistClosed);
    }

    #[test]
    fn gesture_labels_match_overlay_text() {
        assert_eq!(Gesture::FistClosed.to_string(), "Fist Closed");
        assert_eq!(Gesture::HandOpened.to_string(), "Hand Opened");
        assert_eq!(Gesture::NoHand.to_string(), "No Hand");
    }
}
