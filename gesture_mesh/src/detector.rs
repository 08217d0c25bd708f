//! Hand-landmark detectors, from simulation, an external process, or a
//! LeapMotion controller.
//!
//! The public interface is [`HandDetector`]: one frame in, zero or more
//! [`HandObservation`]s out.  The frame loop does not know which source is
//! behind it.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::mpsc::Receiver;

use serde::Deserialize;

use hand_gesture::synth::{self, Pose};
use hand_gesture::{HandObservation, HandSide, Landmark, PerSide, LANDMARK_COUNT};

use crate::error::{Error, Result};
use crate::frame::Frame;

// ════════════════════════════════════════════════════════════════════════════
// DetectorConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorConfig {
    pub max_hands:                usize,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence:  f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            max_hands:                2,
            min_detection_confidence: 0.7,
            min_tracking_confidence:  0.5,
        }
    }
}

impl DetectorConfig {
    /// Drop low-confidence hands, then keep at most `max_hands`, preserving order.
    pub fn apply(&self, hands: Vec<HandObservation>) -> Vec<HandObservation> {
        hands
            .into_iter()
            .filter(|h| h.score >= self.min_detection_confidence)
            .take(self.max_hands)
            .collect()
    }

    /// Command-line form understood by external detectors.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            "--max-hands".to_string(),
            self.max_hands.to_string(),
            "--min-detection-confidence".to_string(),
            self.min_detection_confidence.to_string(),
            "--min-tracking-confidence".to_string(),
            self.min_tracking_confidence.to_string(),
        ]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandDetector trait
// ════════════════════════════════════════════════════════════════════════════

pub trait HandDetector {
    /// Detect hands in one (already mirrored) frame.
    fn process(&mut self, frame: &Frame) -> Result<Vec<HandObservation>>;

    /// Release the detector.  Idempotent.
    fn close(&mut self);
}

impl<T: HandDetector + ?Sized> HandDetector for Box<T> {
    fn process(&mut self, frame: &Frame) -> Result<Vec<HandObservation>> { (**self).process(frame) }
    fn close(&mut self) { (**self).close() }
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandDetector: mouse/keyboard driven hands (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the display window, translated into virtual hand state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Put a hand's wrist at a normalized frame position.
    MoveTo { side: HandSide, x: f32, y: f32 },
    /// Shift a hand's wrist by a normalized offset.
    Nudge  { side: HandSide, dx: f32, dy: f32 },
    /// Close or open a hand.
    Pose   { side: HandSide, pose: Pose },
    /// Show or hide a hand.
    Toggle(HandSide),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SimHand {
    wrist:   (f32, f32),
    pose:    Pose,
    visible: bool,
}

/// Synthesises full 21-point hands from [`SimInput`] events.  The frame
/// contents are ignored; only its presence drives the output.
pub struct SimHandDetector {
    rx:     Receiver<SimInput>,
    hands:  PerSide<SimHand>,
    config: DetectorConfig,
    closed: bool,
}

impl SimHandDetector {
    pub fn new(rx: Receiver<SimInput>, config: DetectorConfig) -> Self {
        let start = |x| SimHand { wrist: (x, 0.75), pose: Pose::Open, visible: true };
        log::info!("Simulated hand detector ready (mouse = right hand, arrows = left hand)");
        SimHandDetector {
            rx,
            hands: PerSide::new(start(0.3), start(0.7)),
            config,
            closed: false,
        }
    }

    fn apply_input(&mut self, input: SimInput) {
        let clamp = |v: f32| v.clamp(0.0, 1.0);
        match input {
            SimInput::MoveTo { side, x, y } => self.hands[side].wrist = (clamp(x), clamp(y)),
            SimInput::Nudge { side, dx, dy } => {
                let (x, y) = self.hands[side].wrist;
                self.hands[side].wrist = (clamp(x + dx), clamp(y + dy));
            }
            SimInput::Pose { side, pose } => self.hands[side].pose = pose,
            SimInput::Toggle(side) => {
                let hand = &mut self.hands[side];
                hand.visible = !hand.visible;
                log::info!("Simulated {} hand {}", side, if hand.visible { "shown" } else { "hidden" });
            }
        }
    }
}

impl HandDetector for SimHandDetector {
    fn process(&mut self, _frame: &Frame) -> Result<Vec<HandObservation>> {
        if self.closed {
            return Ok(Vec::new());
        }
        while let Ok(input) = self.rx.try_recv() {
            self.apply_input(input);
        }
        let hands = self
            .hands
            .iter()
            .filter(|(_, h)| h.visible)
            .map(|(side, h)| synth::hand(side, h.wrist, h.pose))
            .collect();
        Ok(self.config.apply(hands))
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            log::info!("Simulated hand detector closed");
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SubprocessHandDetector: external landmark model over pipes
// ════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
    #[serde(default)]
    z: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    handedness: String,
    score:      f32,
    landmarks:  Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionResponse {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Runs an external hand-landmark program.
///
/// Protocol: the child prints `READY` once loaded.  For each frame the host
/// writes `width`, `height` and `channels` as little-endian `u32`, then the
/// RGB bytes; the child answers with one JSON line
/// `{"hands":[{"handedness":"Left","score":0.9,"landmarks":[{"x":..,"y":..,"z":..}, ...]}],"error":null}`.
pub struct SubprocessHandDetector {
    child:   Child,
    stdin:   Option<ChildStdin>,
    stdout:  BufReader<ChildStdout>,
    config:  DetectorConfig,
    program: String,
    closed:  bool,
}

impl SubprocessHandDetector {
    /// Start `program` with `args` followed by the detector thresholds, and
    /// wait for its `READY` line.
    pub fn spawn(program: &str, args: &[String], config: DetectorConfig) -> Result<Self> {
        log::info!("Starting hand detector: {} {}", program, args.join(" "));
        let mut child = Command::new(program)
            .args(args)
            .args(config.to_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::Detector(format!("cannot run {}: {}", program, e)))?;

        let stdin = child.stdin.take();
        let stdout = match child.stdout.take() {
            Some(s) => s,
            None => {
                let _ = child.kill();
                return Err(Error::Detector(format!("{}: no stdout pipe", program)));
            }
        };
        let mut stdout = BufReader::new(stdout);

        let mut ready = String::new();
        let ok = stdout.read_line(&mut ready).map(|_| ready.trim() == "READY").unwrap_or(false);
        if !ok {
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::Detector(format!(
                "{} did not signal READY (got {:?})",
                program,
                ready.trim()
            )));
        }

        log::info!("Hand detector {} ready", program);
        Ok(SubprocessHandDetector {
            child,
            stdin,
            stdout,
            config,
            program: program.to_string(),
            closed: false,
        })
    }
}

impl HandDetector for SubprocessHandDetector {
    fn process(&mut self, frame: &Frame) -> Result<Vec<HandObservation>> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| Error::Protocol(format!("{} is closed", self.program)))?;
        write_request(stdin, frame)?;

        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(Error::Protocol(format!("{} closed its output", self.program)));
        }
        parse_response(&line, &self.config)
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        // Closing stdin lets a well-behaved child exit on its own.
        self.stdin.take();
        let _ = self.child.kill();
        let _ = self.child.wait();
        log::info!("Hand detector {} closed", self.program);
    }
}

impl Drop for SubprocessHandDetector {
    fn drop(&mut self) {
        self.close();
    }
}

/// How far outside the normalized `[0, 1]` frame a landmark may sit.
const LANDMARK_SLACK: f32 = 1.0;

fn plausible(p: &Landmark) -> bool {
    let in_range = |v: f32| (-LANDMARK_SLACK..=1.0 + LANDMARK_SLACK).contains(&v);
    p.is_finite() && in_range(p.x) && in_range(p.y)
}

/// Frame header plus RGB payload.
fn write_request<W: Write>(out: &mut W, frame: &Frame) -> Result<()> {
    out.write_all(&frame.width().to_le_bytes())?;
    out.write_all(&frame.height().to_le_bytes())?;
    out.write_all(&3u32.to_le_bytes())?;
    out.write_all(&frame.to_rgb_bytes())?;
    out.flush()?;
    Ok(())
}

/// Decode one response line.  A response carrying `error` counts as no hands.
fn parse_response(line: &str, config: &DetectorConfig) -> Result<Vec<HandObservation>> {
    let response: DetectionResponse = serde_json::from_str(line.trim())?;
    if let Some(err) = response.error {
        log::warn!("Hand detector reported: {}", err);
        return Ok(Vec::new());
    }

    let mut hands = Vec::with_capacity(response.hands.len());
    for hand in response.hands {
        let side: HandSide = match hand.handedness.parse() {
            Ok(s)  => s,
            Err(e) => {
                log::warn!("Skipping hand: {}", e);
                continue;
            }
        };
        if hand.landmarks.len() != LANDMARK_COUNT {
            log::warn!("Skipping {} hand: {} landmarks, expected {}", side, hand.landmarks.len(), LANDMARK_COUNT);
            continue;
        }
        let points: Vec<Landmark> = hand
            .landmarks
            .iter()
            .map(|p| Landmark { x: p.x, y: p.y, z: p.z })
            .collect();
        if !points.iter().all(plausible) {
            log::warn!("Skipping {} hand: landmark coordinates out of range", side);
            continue;
        }
        if let Some(obs) = HandObservation::from_slice(side, &points, hand.score) {
            hands.push(obs);
        }
    }
    Ok(config.apply(hands))
}

// ════════════════════════════════════════════════════════════════════════════
// LeapHandDetector: LeapMotion controller (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Hand landmarks from a LeapMotion controller via LeapC.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
/// Joint positions (millimetres above the device) are projected onto the
/// frame plane; the camera image itself is unused.
#[cfg(feature = "leap")]
pub struct LeapHandDetector {
    connection: leaprs::Connection,
    config:     DetectorConfig,
    last:       Vec<HandObservation>,
}

#[cfg(feature = "leap")]
impl LeapHandDetector {
    /// Horizontal span mapped onto the frame width, mm.
    const SPAN_X:  f32 = 400.0;
    /// Height range mapped onto the frame height, mm.
    const MIN_Y:   f32 = 50.0;
    const SPAN_Y:  f32 = 400.0;
    const POLL_MS: u32 = 10;

    pub fn open(config: DetectorConfig) -> Result<Self> {
        use leaprs::{Connection, ConnectionConfig};

        let mut connection = Connection::create(ConnectionConfig::default())
            .map_err(|e| Error::Detector(format!("LeapC connection: {:?}", e)))?;
        connection
            .open()
            .map_err(|e| Error::Detector(format!("LeapMotion device: {:?}", e)))?;
        log::info!("LeapMotion hand detector ready");
        Ok(LeapHandDetector { connection, config, last: Vec::new() })
    }

    fn project(x: f32, y: f32, z: f32) -> Landmark {
        Landmark {
            x: 0.5 + x / Self::SPAN_X,
            y: 1.0 - (y - Self::MIN_Y) / Self::SPAN_Y,
            z: z / Self::SPAN_X,
        }
    }
}

#[cfg(feature = "leap")]
impl HandDetector for LeapHandDetector {
    fn process(&mut self, _frame: &Frame) -> Result<Vec<HandObservation>> {
        use leaprs::*;

        macro_rules! joint {
            ($p:expr) => {{
                let p = $p;
                LeapHandDetector::project(p.x, p.y, p.z)
            }};
        }

        let msg = match self.connection.poll(Self::POLL_MS) {
            Ok(m)  => m,
            Err(_) => return Ok(self.config.apply(self.last.clone())),
        };

        if let Event::Tracking(frame) = msg.event() {
            let mut hands = Vec::new();
            for hand in frame.hands() {
                let side = if hand.hand_type() == HandType::Left { HandSide::Left } else { HandSide::Right };
                let digits: Vec<_> = hand.digits().collect();
                if digits.len() < 5 {
                    continue;
                }
                let mut points = Vec::with_capacity(LANDMARK_COUNT);
                // The middle metacarpal's base sits at the wrist.
                points.push(joint!(digits[2].metacarpal().prev_joint()));
                for d in &digits {
                    points.push(joint!(d.proximal().prev_joint()));
                    points.push(joint!(d.intermediate().prev_joint()));
                    points.push(joint!(d.distal().prev_joint()));
                    points.push(joint!(d.distal().next_joint()));
                }
                hands.extend(HandObservation::from_slice(side, &points, 1.0));
            }
            self.last = hands;
        }
        Ok(self.config.apply(self.last.clone()))
    }

    fn close(&mut self) {
        self.last.clear();
        log::info!("LeapMotion hand detector closed");
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
