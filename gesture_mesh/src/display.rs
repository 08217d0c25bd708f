//! Camera-frame window using `minifb`.
//!
//! Besides showing frames and reporting key presses, the window is the input
//! device for the simulated hand detector:
//!
//! | Input | Effect |
//! |---|---|
//! | Mouse move | Right hand follows the pointer |
//! | Left mouse button held | Right hand closes into a fist |
//! | Arrow keys held | Left hand moves |
//! | `Space` held | Left hand closes into a fist |
//! | `1` / `2` | Hide or show the left / right hand |
//! | `Q` | Quit |

use std::sync::mpsc::Sender;
use std::time::Duration;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use hand_gesture::synth::Pose;
use hand_gesture::{HandSide, PerSide};

use crate::detector::SimInput;
use crate::error::{Error, Result};
use crate::frame::Frame;

/// Where processed frames are shown and keys are read.
pub trait Display {
    fn show(&mut self, frame: &Frame) -> Result<()>;

    /// Wait up to `timeout_ms` and return a key pressed meanwhile, if any.
    fn wait_key(&mut self, timeout_ms: u64) -> Option<char>;

    /// False once the user has closed the window.
    fn is_open(&self) -> bool;
}

/// Left hand speed under the arrow keys, frame fraction per poll.
const NUDGE_STEP: f32 = 0.01;

pub struct FrameWindow {
    window:     Window,
    size:       (usize, usize),
    sim_tx:     Option<Sender<SimInput>>,
    last_mouse: Option<(f32, f32)>,
    last_pose:  PerSide<Pose>,
}

impl FrameWindow {
    /// Open a window for `width`×`height` frames.  With `sim_tx` set, mouse
    /// and keyboard drive the simulated hands.
    pub fn new(title: &str, width: usize, height: usize, sim_tx: Option<Sender<SimInput>>) -> Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::Window(e.to_string()))?;
        window.limit_update_rate(Some(Duration::from_millis(16)));
        log::info!("Opened frame window {}x{}", width, height);
        Ok(FrameWindow {
            window,
            size: (width, height),
            sim_tx,
            last_mouse: None,
            last_pose: PerSide::splat(Pose::Open),
        })
    }

    fn send(&self, input: SimInput) {
        if let Some(tx) = &self.sim_tx {
            let _ = tx.send(input);
        }
    }

    /// Translate window input into simulated-hand events.
    fn forward_sim_input(&mut self) {
        if self.sim_tx.is_none() {
            return;
        }

        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let pos = (mx / self.size.0 as f32, my / self.size.1 as f32);
            if self.last_mouse != Some(pos) {
                self.last_mouse = Some(pos);
                self.send(SimInput::MoveTo { side: HandSide::Right, x: pos.0, y: pos.1 });
            }
        }

        let pose = |closed: bool| if closed { Pose::Fist } else { Pose::Open };
        let poses = PerSide::new(
            pose(self.window.is_key_down(Key::Space)),
            pose(self.window.get_mouse_down(MouseButton::Left)),
        );
        for side in HandSide::ALL {
            if poses[side] != self.last_pose[side] {
                self.last_pose[side] = poses[side];
                self.send(SimInput::Pose { side, pose: poses[side] });
            }
        }

        let axis = |neg: Key, pos: Key| {
            let mut v = 0.0;
            if self.window.is_key_down(neg) { v -= NUDGE_STEP; }
            if self.window.is_key_down(pos) { v += NUDGE_STEP; }
            v
        };
        let (dx, dy) = (axis(Key::Left, Key::Right), axis(Key::Up, Key::Down));
        if dx != 0.0 || dy != 0.0 {
            self.send(SimInput::Nudge { side: HandSide::Left, dx, dy });
        }

        if self.window.is_key_pressed(Key::Key1, KeyRepeat::No) {
            self.send(SimInput::Toggle(HandSide::Left));
        }
        if self.window.is_key_pressed(Key::Key2, KeyRepeat::No) {
            self.send(SimInput::Toggle(HandSide::Right));
        }
    }
}

impl Display for FrameWindow {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        self.window
            .update_with_buffer(frame.pixels(), frame.width() as usize, frame.height() as usize)
            .map_err(|e| Error::Window(e.to_string()))
    }

    fn wait_key(&mut self, timeout_ms: u64) -> Option<char> {
        std::thread::sleep(Duration::from_millis(timeout_ms));
        self.forward_sim_input();
        self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .find_map(key_char)
    }

    fn is_open(&self) -> bool {
        self.window.is_open()
    }
}

/// Character for the letter and digit keys; `None` for everything else.
fn key_char(key: Key) -> Option<char> {
    let c = match key {
        Key::A => 'a', Key::B => 'b', Key::C => 'c', Key::D => 'd', Key::E => 'e',
        Key::F => 'f', Key::G => 'g', Key::H => 'h', Key::I => 'i', Key::J => 'j',
        Key::K => 'k', Key::L => 'l', Key::M => 'm', Key::N => 'n', Key::O => 'o',
        Key::P => 'p', Key::Q => 'q', Key::R => 'r', Key::S => 's', Key::T => 't',
        Key::U => 'u', Key::V => 'v', Key::W => 'w', Key::X => 'x', Key::Y => 'y',
        Key::Z => 'z',
        Key::Key0 => '0', Key::Key1 => '1', Key::Key2 => '2', Key::Key3 => '3',
        Key::Key4 => '4', Key::Key5 => '5', Key::Key6 => '6', Key::Key7 => '7',
        Key::Key8 => '8', Key::Key9 => '9',
        Key::Space  => ' ',
        Key::Escape => '\u{1b}',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_key_maps_to_q() {
        assert_eq!(key_char(Key::Q), Some('q'));
        assert_eq!(key_char(Key::Key2), Some('2'));
        assert_eq!(key_char(Key::LeftShift), None);
    }
}
