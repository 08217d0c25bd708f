//! # gesture_mesh
//!
//! Webcam hand-gesture controller for a 3D mesh viewer.  Two windows open:
//! the mirrored camera view with the detected hand skeletons and gesture
//! labels, and the mesh itself.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Hand | Action |
//! |---|---|---|
//! | Fist closed, hand moving | Right | Rotate the mesh: vertical motion about X, horizontal about Y |
//! | Fist closed, hand moving | Left | Scale the mesh with horizontal motion (0.2× to 3×) |
//! | Hand open | Either | Nothing; the hand can be repositioned freely |
//! | `Q` key | | Quit |
//!
//! ## Feature flags
//!
//! * (default): **Simulation mode**. A generated backdrop stands in for
//!   the camera, and mouse and keyboard drive two virtual hands (see
//!   [`display`]).  An external landmark program can be plugged in with
//!   `--detector`.
//! * `webcam`: capture real frames through `nokhwa` (`--camera INDEX`).
//! * `leap`: read hands from a LeapMotion controller via LeapC (`--leap`).

pub mod error;
pub mod frame;
pub mod camera;
pub mod detector;
pub mod overlay;
pub mod display;
pub mod mesh_window;
pub mod app;

pub use error::{Error, Result};
pub use frame::Frame;
pub use camera::{Camera, SyntheticCamera};
pub use detector::{DetectorConfig, HandDetector, SimHandDetector, SimInput, SubprocessHandDetector};
pub use display::{Display, FrameWindow};
pub use mesh_window::{MeshRenderer, MeshWindow};
pub use app::{run, AppConfig, CameraSource, DetectorSource, FrameLoop, LoopState, StopReason};
