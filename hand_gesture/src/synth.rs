//! Synthetic hand poses.
//!
//! Used by the simulated detector (mouse and keyboard drive two virtual
//! hands) and by tests that need plausible landmark sets.  Offsets are in
//! normalized frame units relative to the wrist, for a 4:3 frame.

use crate::landmark::{HandObservation, HandSide, Landmark, LANDMARK_COUNT, WRIST};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    Fist,
    Open,
}

/// Per digit: (base, tip) offsets from the wrist for a right hand.
/// Digit order is thumb, index, middle, ring, pinky.
const OPEN_DIGITS: [((f32, f32), (f32, f32)); 5] = [
    ((-0.05, -0.04), (-0.18, -0.10)),
    ((-0.06, -0.16), (-0.10, -0.38)),
    (( 0.00, -0.17), ( 0.00, -0.42)),
    (( 0.05, -0.16), ( 0.08, -0.38)),
    (( 0.09, -0.13), ( 0.15, -0.30)),
];

const FIST_DIGITS: [((f32, f32), (f32, f32)); 5] = [
    ((-0.04, -0.03), (-0.030, -0.070)),
    ((-0.04, -0.10), (-0.035, -0.060)),
    (( 0.00, -0.11), ( 0.000, -0.065)),
    (( 0.035, -0.10), ( 0.030, -0.060)),
    (( 0.065, -0.085), ( 0.055, -0.050)),
];

pub fn fist(side: HandSide, wrist: (f32, f32)) -> HandObservation {
    hand(side, wrist, Pose::Fist)
}

pub fn open_hand(side: HandSide, wrist: (f32, f32)) -> HandObservation {
    hand(side, wrist, Pose::Open)
}

/// Build a full 21-landmark hand with its wrist exactly at `wrist`.
pub fn hand(side: HandSide, wrist: (f32, f32), pose: Pose) -> HandObservation {
    // Left hands are the mirror image of right hands.
    let flip = match side {
        HandSide::Right => 1.0,
        HandSide::Left  => -1.0,
    };
    let at = |(dx, dy): (f32, f32)| Landmark::new(wrist.0 + dx * flip, wrist.1 + dy);
    let lerp = |a: (f32, f32), b: (f32, f32), t: f32| (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t);

    let digits = match pose {
        Pose::Fist => &FIST_DIGITS,
        Pose::Open => &OPEN_DIGITS,
    };

    let mut pts = [Landmark::default(); LANDMARK_COUNT];
    pts[WRIST] = Landmark::new(wrist.0, wrist.1);

    for (digit, &(base, tip)) in digits.iter().enumerate() {
        let first = 1 + digit * 4;
        let (second, third) = match pose {
            Pose::Open => (lerp(base, tip, 0.4), lerp(base, tip, 0.7)),
            // Curled: knuckle rises, then the finger folds back to the palm.
            Pose::Fist => {
                let knuckle = (base.0, base.1 - 0.03);
                (knuckle, lerp(knuckle, tip, 0.5))
            }
        };
        pts[first]     = at(base);
        pts[first + 1] = at(second);
        pts[first + 2] = at(third);
        pts[first + 3] = at(tip);
    }

    HandObservation::new(side, pts)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
