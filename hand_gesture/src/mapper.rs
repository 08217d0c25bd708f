//! Hand motion → transform commands.
//!
//! The right fist rotates, the left fist scales.  Rotation is emitted as a
//! relative increment (the renderer owns the orientation); scale is
//! accumulated here and emitted as an absolute value.

use crate::classifier::Gesture;
use crate::landmark::HandSide;
use crate::tracker::Displacement;

// ════════════════════════════════════════════════════════════════════════════
// MappingConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MappingConfig {
    /// Degrees of rotation per unit of damped displacement.
    pub rotation_gain:     f32,
    /// Scale change per unit of damped horizontal displacement.
    pub scale_sensitivity: f32,
    pub min_scale:         f32,
    pub max_scale:         f32,
    pub initial_scale:     f32,
}

impl Default for MappingConfig {
    fn default() -> Self {
        MappingConfig {
            rotation_gain:     180.0,
            scale_sensitivity: 5.0,
            min_scale:         0.2,
            max_scale:         3.0,
            initial_scale:     1.0,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TransformCommand
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformCommand {
    /// Rotate by these increments about the object's own X then Y axis.
    Rotate { x_degrees: f32, y_degrees: f32 },
    /// Set the uniform scale to this absolute factor.
    SetScale(f32),
}

// ════════════════════════════════════════════════════════════════════════════
// ViewState
// ════════════════════════════════════════════════════════════════════════════

/// Session-wide view parameters owned by the mapper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub scale_factor: f32,
    pub min_scale:    f32,
    pub max_scale:    f32,
}

impl ViewState {
    pub fn new(scale_factor: f32, min_scale: f32, max_scale: f32) -> Self {
        ViewState {
            scale_factor: scale_factor.clamp(min_scale, max_scale),
            min_scale,
            max_scale,
        }
    }

    /// Add `change` and clamp into `[min_scale, max_scale]`.  A non-finite
    /// change leaves the scale untouched.
    pub fn adjust_scale(&mut self, change: f32) -> f32 {
        if !change.is_finite() {
            return self.scale_factor;
        }
        self.scale_factor = (self.scale_factor + change).clamp(self.min_scale, self.max_scale);
        self.scale_factor
    }
}

impl Default for ViewState {
    fn default() -> Self {
        let cfg = MappingConfig::default();
        ViewState::new(cfg.initial_scale, cfg.min_scale, cfg.max_scale)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TransformMapper
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct TransformMapper {
    config: MappingConfig,
    view:   ViewState,
}

impl Default for TransformMapper {
    fn default() -> Self {
        TransformMapper::new(MappingConfig::default())
    }
}

impl TransformMapper {
    pub fn new(config: MappingConfig) -> Self {
        let view = ViewState::new(config.initial_scale, config.min_scale, config.max_scale);
        TransformMapper { config, view }
    }

    pub fn config(&self) -> &MappingConfig { &self.config }
    pub fn view(&self) -> &ViewState { &self.view }
    pub fn scale_factor(&self) -> f32 { self.view.scale_factor }

    /// Map one hand's gesture and motion to a command.
    ///
    /// Only a closed fist does anything.  Non-finite motion is dropped.
    pub fn apply(
        &mut self,
        side:    HandSide,
        gesture: Gesture,
        delta:   Displacement,
    ) -> Option<TransformCommand> {
        if gesture != Gesture::FistClosed {
            return None;
        }
        if !(delta.dx.is_finite() && delta.dy.is_finite()) {
            log::warn!("{} hand: ignoring non-finite motion {:?}", side, delta);
            return None;
        }
        match side {
            HandSide::Right => Some(TransformCommand::Rotate {
                x_degrees: delta.dy * self.config.rotation_gain,
                y_degrees: delta.dx * self.config.rotation_gain,
            }),
            HandSide::Left => {
                let change = delta.dx * self.config.scale_sensitivity;
                Some(TransformCommand::SetScale(self.view.adjust_scale(change)))
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool { (a - b).abs() < 1e-5 }

    #[test]
    fn right_fist_rotates() {
        let mut m = TransformMapper::default();
        let cmd = m.apply(HandSide::Right, Gesture::FistClosed, Displacement::new(0.01, -0.02));
        match cmd {
            Some(TransformCommand::Rotate { x_degrees, y_degrees }) => {
                assert!(close(x_degrees, -3.6));
                assert!(close(y_degrees, 1.8));
            }
            other => panic!("expected rotation, got {:?}", other),
        }
        // Rotation never touches the scale.
        assert_eq!(m.scale_factor(), 1.0);
    }

    #[test]
    fn left_fist_scales() {
        let mut m = TransformMapper::default();
        let cmd = m.apply(HandSide::Left, Gesture::FistClosed, Displacement::new(0.1, 0.4));
        match cmd {
            Some(TransformCommand::SetScale(s)) => assert!(close(s, 1.5)),
            other => panic!("expected scale, got {:?}", other),
        }
        assert!(close(m.scale_factor(), 1.5));
    }

    #[test]
    fn open_hand_does_nothing() {
        let mut m = TransformMapper::default();
        for side in HandSide::ALL {
            assert_eq!(m.apply(side, Gesture::HandOpened, Displacement::new(5.0, 5.0)), None);
            assert_eq!(m.apply(side, Gesture::NoHand, Displacement::new(5.0, 5.0)), None);
        }
        assert_eq!(m.scale_factor(), 1.0);
    }

    #[test]
    fn scale_clamps_at_max() {
        let mut m = TransformMapper::default();
        for _ in 0..50 {
            m.apply(HandSide::Left, Gesture::FistClosed, Displacement::new(1.0, 0.0));
        }
        assert_eq!(m.scale_factor(), 3.0);
        let cmd = m.apply(HandSide::Left, Gesture::FistClosed, Displacement::new(1.0, 0.0));
        assert_eq!(cmd, Some(TransformCommand::SetScale(3.0)));
    }

    #[test]
    fn scale_clamps_at_min() {
        let mut m = TransformMapper::default();
        for _ in 0..50 {
            m.apply(HandSide::Left, Gesture::FistClosed, Displacement::new(-1.0, 0.0));
        }
        assert_eq!(m.scale_factor(), 0.2);
    }

    #[test]
    fn scale_recovers_from_clamp_immediately() {
        let mut m = TransformMapper::default();
        m.apply(HandSide::Left, Gesture::FistClosed, Displacement::new(100.0, 0.0));
        m.apply(HandSide::Left, Gesture::FistClosed, Displacement::new(-0.1, 0.0));
        assert!(close(m.scale_factor(), 2.5));
    }

    #[test]
    fn vertical_motion_does_not_scale() {
        let mut m = TransformMapper::default();
        let cmd = m.apply(HandSide::Left, Gesture::FistClosed, Displacement::new(0.0, 0.7));
        assert_eq!(cmd, Some(TransformCommand::SetScale(1.0)));
    }

    #[test]
    fn non_finite_motion_is_ignored() {
        let mut m = TransformMapper::default();
        for bad in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            assert_eq!(m.apply(HandSide::Right, Gesture::FistClosed, Displacement::new(bad, 0.0)), None);
            assert_eq!(m.apply(HandSide::Right, Gesture::FistClosed, Displacement::new(0.0, bad)), None);
            assert_eq!(m.apply(HandSide::Left, Gesture::FistClosed, Displacement::new(bad, 0.0)), None);
        }
        assert_eq!(m.scale_factor(), 1.0);
    }

    #[test]
    fn non_finite_scale_change_keeps_scale() {
        let mut v = ViewState::default();
        assert_eq!(v.adjust_scale(f32::NAN), 1.0);
        assert_eq!(v.adjust_scale(f32::INFINITY), 1.0);
        assert_eq!(v.adjust_scale(0.5), 1.5);
    }

    #[test]
    fn view_state_clamps_initial_value() {
        let v = ViewState::new(9.0, 0.2, 3.0);
        assert_eq!(v.scale_factor, 3.0);
    }
}
