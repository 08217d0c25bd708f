//! Per-hand wrist tracking.
//!
//! The tracker remembers where each hand's wrist was on the previous frame
//! it was seen and turns the next sighting into a damped displacement.
//! A side's first sighting yields nothing.

use crate::landmark::{HandSide, PerSide};

/// Pixel displacement → transform increment factor.
pub const DEFAULT_DAMPING: f32 = 0.002;

/// Damped wrist motion between two consecutive sightings of one hand.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Displacement {
    pub dx: f32,
    pub dy: f32,
}

impl Displacement {
    pub const fn new(dx: f32, dy: f32) -> Self {
        Displacement { dx, dy }
    }
}

/// What the tracker remembers about one side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackingState {
    pub last_position:  (f32, f32),
    pub is_first_frame: bool,
}

impl Default for TrackingState {
    fn default() -> Self {
        TrackingState { last_position: (0.0, 0.0), is_first_frame: true }
    }
}

#[derive(Clone, Debug)]
pub struct MotionTracker {
    states:  PerSide<TrackingState>,
    damping: f32,
}

impl Default for MotionTracker {
    fn default() -> Self {
        MotionTracker::new(DEFAULT_DAMPING)
    }
}

impl MotionTracker {
    pub fn new(damping: f32) -> Self {
        MotionTracker { states: PerSide::default(), damping }
    }

    /// Record `position` (pixels) for `side` and return the damped motion
    /// since its previous sighting, or `None` on the first one.
    pub fn update(&mut self, side: HandSide, position: (f32, f32)) -> Option<Displacement> {
        let state = &mut self.states[side];
        let delta = if state.is_first_frame {
            state.is_first_frame = false;
            None
        } else {
            let (lx, ly) = state.last_position;
            Some(Displacement::new(
                (position.0 - lx) * self.damping,
                (position.1 - ly) * self.damping,
            ))
        };
        state.last_position = position;
        delta
    }

    /// Forget `side`; its next sighting is treated as a first appearance.
    pub fn reset(&mut self, side: HandSide) {
        self.states[side] = TrackingState::default();
    }

    pub fn reset_all(&mut self) {
        self.states = PerSide::default();
    }

    pub fn last_position(&self, side: HandSide) -> (f32, f32) { self.states[side].last_position }
    pub fn is_first_frame(&self, side: HandSide) -> bool { self.states[side].is_first_frame }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
