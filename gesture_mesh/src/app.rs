//! Configuration and the frame loop.
//!
//! `FrameLoop` owns the four collaborators and the gesture [`Session`].
//! Each `step()` captures one frame, detects hands, applies the resulting
//! transform commands to the mesh, and shows the annotated frame.

use std::path::PathBuf;
use std::sync::mpsc;

use hand_gesture::{FrameReport, HandSide, Session, SessionConfig, TransformCommand};
use mesh_view::Mesh;

use crate::camera::{Camera, SyntheticCamera};
use crate::detector::{DetectorConfig, HandDetector, SimHandDetector, SubprocessHandDetector};
use crate::display::{Display, FrameWindow};
use crate::error::{Error, Result};
use crate::mesh_window::{MeshRenderer, MeshWindow};
use crate::overlay::{self, TEXT_COLOR};

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum CameraSource {
    /// Generated frames; `frame_limit` ends the run after that many.
    Synthetic { width: u32, height: u32, frame_limit: Option<u64> },
    /// Native device (requires the `webcam` feature).
    Webcam { index: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum DetectorSource {
    /// Hands driven by mouse and keyboard in the frame window.
    Simulated,
    /// External landmark program speaking the JSON-lines protocol.
    Subprocess { program: String, args: Vec<String> },
    /// LeapMotion controller (requires the `leap` feature).
    Leap,
}

/// Configuration for the full application.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub mesh_path:       PathBuf,
    pub camera:          CameraSource,
    pub detector:        DetectorSource,
    pub detector_config: DetectorConfig,
    pub session:         SessionConfig,
    pub frame_window:    (usize, usize),
    pub mesh_window:     (usize, usize),
    pub quit_key:        char,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            mesh_path:       PathBuf::from("rubber_duck.stl"),
            camera:          CameraSource::Synthetic { width: 640, height: 480, frame_limit: None },
            detector:        DetectorSource::Simulated,
            detector_config: DetectorConfig::default(),
            session:         SessionConfig::default(),
            frame_window:    (640, 480),
            mesh_window:     (480, 480),
            quit_key:        'q',
        }
    }
}

pub const USAGE: &str = "\
usage: gesture_mesh [--mesh PATH] [--camera INDEX | --frames N] [--leap | --detector PROGRAM [ARGS...]]

  --mesh PATH          STL file to display (default: rubber_duck.stl)
  --camera INDEX       capture from webcam INDEX (needs the `webcam` feature)
  --frames N           stop the synthetic camera after N frames
  --leap               read hands from a LeapMotion controller (needs the `leap` feature)
  --detector PROGRAM   run PROGRAM as the hand detector; every later argument is passed to it";

impl AppConfig {
    /// Parse command-line arguments (without the program name).
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cfg = AppConfig::default();
        let mut camera_index: Option<u32> = None;
        let mut frame_limit:  Option<u64> = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--mesh" => cfg.mesh_path = PathBuf::from(value(&mut args, "--mesh")?),
                "--camera" => camera_index = Some(number(&mut args, "--camera")?),
                "--frames" => frame_limit = Some(number(&mut args, "--frames")?),
                "--leap" => cfg.detector = DetectorSource::Leap,
                "--detector" => {
                    let program = value(&mut args, "--detector")?;
                    cfg.detector = DetectorSource::Subprocess { program, args: args.by_ref().collect() };
                }
                "-h" | "--help" => return Err(Error::Usage(USAGE.to_string())),
                other => return Err(Error::Usage(format!("unknown argument `{}`\n{}", other, USAGE))),
            }
        }

        cfg.camera = match (camera_index, frame_limit) {
            (Some(_), Some(_)) => {
                return Err(Error::Usage("--frames applies only to the synthetic camera".to_string()))
            }
            (Some(index), None) => CameraSource::Webcam { index },
            (None, limit) => CameraSource::Synthetic { width: 640, height: 480, frame_limit: limit },
        };
        Ok(cfg)
    }
}

fn value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String> {
    args.next().ok_or_else(|| Error::Usage(format!("{} needs a value", flag)))
}

fn number<T: std::str::FromStr, I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<T> {
    let v = value(args, flag)?;
    v.parse().map_err(|_| Error::Usage(format!("{}: `{}` is not a valid number", flag, v)))
}

// ════════════════════════════════════════════════════════════════════════════
// FrameLoop
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState { Running, Stopped }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    CameraEnded,
    QuitKey,
    WindowClosed,
}

/// Label text scale and placement on the camera frame.
const LABEL_SCALE:  i32 = 4;
const LABEL_ORIGIN: (i32, i32) = (10, 10);
const LABEL_GAP:    i32 = 20;

pub struct FrameLoop<C, D, R, S> {
    camera:      C,
    detector:    D,
    renderer:    R,
    display:     S,
    session:     Session,
    quit_key:    char,
    state:       LoopState,
    stop_reason: Option<StopReason>,
    frames:      u64,
    last_report: FrameReport,
    shut_down:   bool,
}

impl<C, D, R, S> FrameLoop<C, D, R, S>
where
    C: Camera,
    D: HandDetector,
    R: MeshRenderer,
    S: Display,
{
    pub fn new(camera: C, detector: D, renderer: R, display: S, session: Session, quit_key: char) -> Self {
        FrameLoop {
            camera,
            detector,
            renderer,
            display,
            session,
            quit_key,
            state:       LoopState::Running,
            stop_reason: None,
            frames:      0,
            last_report: FrameReport::default(),
            shut_down:   false,
        }
    }

    pub fn state(&self)             -> LoopState          { self.state }
    pub fn stop_reason(&self)       -> Option<StopReason> { self.stop_reason }
    pub fn frames(&self)            -> u64                { self.frames }
    pub fn session(&self)           -> &Session           { &self.session }
    pub fn last_report(&self)       -> &FrameReport       { &self.last_report }
    pub fn camera(&self)            -> &C                 { &self.camera }
    pub fn detector(&self)          -> &D                 { &self.detector }
    pub fn renderer(&self)          -> &R                 { &self.renderer }
    pub fn display(&self)           -> &S                 { &self.display }

    fn stop(&mut self, reason: StopReason) -> LoopState {
        if self.state == LoopState::Running {
            log::info!("Stopping after {} frames: {:?}", self.frames, reason);
            self.state = LoopState::Stopped;
            self.stop_reason = Some(reason);
        }
        self.state
    }

    /// Process one frame.  Returns the state afterwards.
    pub fn step(&mut self) -> Result<LoopState> {
        if self.state == LoopState::Stopped {
            return Ok(LoopState::Stopped);
        }
        if !self.display.is_open() || !self.renderer.is_open() {
            return Ok(self.stop(StopReason::WindowClosed));
        }

        let mut frame = match self.camera.read() {
            Some(f) => f,
            None    => return Ok(self.stop(StopReason::CameraEnded)),
        };
        frame.mirror_horizontal();

        let hands = self.detector.process(&frame)?;
        let report = self.session.process_frame(&hands, frame.width(), frame.height());
        log::debug!(
            "Frame {}: left={} right={} commands={}",
            self.frames,
            report.gestures[HandSide::Left],
            report.gestures[HandSide::Right],
            report.commands.len()
        );

        for cmd in &report.commands {
            self.apply(cmd)?;
        }

        for hand in &hands {
            overlay::draw_landmarks(&mut frame, hand);
        }
        let line_height = overlay::text_height(LABEL_SCALE) + LABEL_GAP;
        for (row, (side, gesture)) in report.gestures.iter().enumerate() {
            let text = format!("{} Hand: {}", side, gesture);
            let pos = (LABEL_ORIGIN.0, LABEL_ORIGIN.1 + row as i32 * line_height);
            overlay::draw_text(&mut frame, &text, pos, TEXT_COLOR, LABEL_SCALE);
        }

        self.display.show(&frame)?;
        self.renderer.render()?;
        self.frames += 1;
        self.last_report = report;

        if self.display.wait_key(1) == Some(self.quit_key) {
            return Ok(self.stop(StopReason::QuitKey));
        }
        Ok(self.state)
    }

    fn apply(&mut self, cmd: &TransformCommand) -> Result<()> {
        log::debug!("Apply {:?}", cmd);
        match *cmd {
            TransformCommand::Rotate { x_degrees, y_degrees } => {
                self.renderer.rotate_x(x_degrees);
                self.renderer.rotate_y(y_degrees);
            }
            TransformCommand::SetScale(factor) => self.renderer.set_uniform_scale(factor),
        }
        self.renderer.render()
    }

    /// Step until stopped, then release the camera and detector.  They are
    /// released on error too.
    pub fn run(&mut self) -> Result<StopReason> {
        let outcome = loop {
            match self.step() {
                Ok(LoopState::Running) => continue,
                Ok(LoopState::Stopped) => break Ok(self.stop_reason.unwrap_or(StopReason::CameraEnded)),
                Err(e) => break Err(e),
            }
        };
        self.shutdown();
        outcome
    }

    /// Release the camera and close the detector.  Idempotent.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.camera.release();
        self.detector.close();
        log::info!("Camera released, detector closed");
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): wire real collaborators together
// ════════════════════════════════════════════════════════════════════════════

fn open_camera(source: &CameraSource) -> Result<Box<dyn Camera>> {
    match *source {
        CameraSource::Synthetic { width, height, frame_limit } => {
            Ok(Box::new(SyntheticCamera::new(width, height, frame_limit)))
        }
        #[cfg(feature = "webcam")]
        CameraSource::Webcam { index } => Ok(Box::new(crate::camera::NokhwaCamera::open(index)?)),
        #[cfg(not(feature = "webcam"))]
        CameraSource::Webcam { index } => Err(Error::Camera(format!(
            "camera {} requested but this build has no webcam support (rebuild with --features webcam)",
            index
        ))),
    }
}

fn open_detector(
    source: &DetectorSource,
    config: DetectorConfig,
    sim_rx: mpsc::Receiver<crate::detector::SimInput>,
) -> Result<Box<dyn HandDetector>> {
    match source {
        DetectorSource::Simulated => Ok(Box::new(SimHandDetector::new(sim_rx, config))),
        DetectorSource::Subprocess { program, args } => {
            Ok(Box::new(SubprocessHandDetector::spawn(program, args, config)?))
        }
        #[cfg(feature = "leap")]
        DetectorSource::Leap => Ok(Box::new(crate::detector::LeapHandDetector::open(config)?)),
        #[cfg(not(feature = "leap"))]
        DetectorSource::Leap => Err(Error::Detector(
            "LeapMotion requested but this build has no leap support (rebuild with --features leap)".to_string(),
        )),
    }
}

/// Run the full application.
///
/// Loads the mesh, opens the camera, detector and both windows, and drives
/// the frame loop until the camera ends, the quit key is pressed or a
/// window is closed.
pub fn run(cfg: AppConfig) -> Result<StopReason> {
    let mesh = Mesh::load(&cfg.mesh_path)?;

    let (sim_tx, sim_rx) = mpsc::channel();
    let sim_tx = (cfg.detector == DetectorSource::Simulated).then_some(sim_tx);

    let camera   = open_camera(&cfg.camera)?;
    let detector = open_detector(&cfg.detector, cfg.detector_config, sim_rx)?;
    let display  = FrameWindow::new("Hand Tracking", cfg.frame_window.0, cfg.frame_window.1, sim_tx)?;
    let renderer = MeshWindow::new("Mesh", mesh, cfg.mesh_window.0, cfg.mesh_window.1)?;

    let mut frame_loop = FrameLoop::new(camera, detector, renderer, display, Session::new(cfg.session), cfg.quit_key);
    frame_loop.run()
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
