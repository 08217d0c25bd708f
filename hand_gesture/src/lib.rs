//! # hand_gesture
//!
//! Turns per-frame hand landmarks into incremental transforms for a 3D
//! object.  Everything here is pure logic; camera capture, landmark
//! detection and rendering live in the `gesture_mesh` application crate.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Hand | Action |
//! |---|---|---|
//! | Fist closed, moving | Right | Rotate: vertical motion → X axis, horizontal → Y axis |
//! | Fist closed, moving | Left | Scale: horizontal motion grows/shrinks, clamped 0.2–3.0 |
//! | Hand opened | Either | Nothing |
//!
//! ## Quick start
//!
//! ```rust
//! use hand_gesture::{Session, HandSide, Gesture, TransformCommand};
//! use hand_gesture::synth;
//!
//! let mut session = Session::default();
//!
//! // First sighting only records the wrist position.
//! let first = session.process_frame(&[synth::fist(HandSide::Right, (0.5, 0.5))], 640, 480);
//! assert_eq!(first.gestures[HandSide::Right], Gesture::FistClosed);
//! assert!(first.commands.is_empty());
//!
//! // Moving the closed fist rotates the object.
//! let second = session.process_frame(&[synth::fist(HandSide::Right, (0.6, 0.5))], 640, 480);
//! assert!(matches!(second.commands[0], TransformCommand::Rotate { .. }));
//! ```

pub mod landmark;
pub mod classifier;
pub mod tracker;
pub mod mapper;
pub mod session;
pub mod synth;

pub use landmark::{HandObservation, HandSide, Landmark, PerSide, LANDMARK_COUNT, HAND_CONNECTIONS};
pub use classifier::{classify, classify_with, distance, Gesture, GestureThresholds, HandMetrics};
pub use tracker::{Displacement, MotionTracker, TrackingState, DEFAULT_DAMPING};
pub use mapper::{MappingConfig, TransformCommand, TransformMapper, ViewState};
pub use session::{FrameReport, Session, SessionConfig};
