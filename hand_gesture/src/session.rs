//! The per-session context that replaces process-wide globals.
//!
//! `Session` owns the only state that survives from one frame to the next:
//! the motion tracker and the mapper's view state.  The frame loop feeds it
//! each frame's observations and applies whatever commands come back.

use crate::classifier::{classify_with, Gesture, GestureThresholds};
use crate::landmark::{HandObservation, PerSide};
use crate::mapper::{MappingConfig, TransformCommand, TransformMapper};
use crate::tracker::{MotionTracker, DEFAULT_DAMPING};

/// Tunables for one session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    pub thresholds: GestureThresholds,
    pub mapping:    MappingConfig,
    pub damping:    f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            thresholds: GestureThresholds::default(),
            mapping:    MappingConfig::default(),
            damping:    DEFAULT_DAMPING,
        }
    }
}

/// Result of processing one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Gesture per side; `NoHand` where the side was not observed.
    pub gestures: PerSide<Gesture>,
    /// Commands in detector order.
    pub commands: Vec<TransformCommand>,
}

#[derive(Clone, Debug)]
pub struct Session {
    thresholds: GestureThresholds,
    tracker:    MotionTracker,
    mapper:     TransformMapper,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(cfg: SessionConfig) -> Self {
        Session {
            thresholds: cfg.thresholds,
            tracker:    MotionTracker::new(cfg.damping),
            mapper:     TransformMapper::new(cfg.mapping),
        }
    }

    /// Classify, track and map every observed hand of one frame.
    pub fn process_frame(
        &mut self,
        hands:  &[HandObservation],
        width:  u32,
        height: u32,
    ) -> FrameReport {
        let mut report = FrameReport::default();

        for hand in hands {
            let gesture = classify_with(hand, width, height, &self.thresholds);
            report.gestures[hand.side] = gesture;

            let wrist = hand.wrist_pixels(width, height);
            if let Some(delta) = self.tracker.update(hand.side, wrist) {
                if let Some(cmd) = self.mapper.apply(hand.side, gesture, delta) {
                    log::debug!("{} {}: {:?}", hand.side, gesture, cmd);
                    report.commands.push(cmd);
                }
            }
        }

        report
    }

    pub fn scale_factor(&self) -> f32 { self.mapper.scale_factor() }
    pub fn tracker(&self) -> &MotionTracker { &self.tracker }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
