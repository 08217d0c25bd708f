//! Frame sources.
//!
//! [`SyntheticCamera`] is always available and needs no hardware.  With the
//! `webcam` feature, [`NokhwaCamera`] captures from a real device.

use crate::frame::Frame;

/// Anything that yields video frames.
pub trait Camera {
    /// Next frame, or `None` once the source has failed or is exhausted.
    fn read(&mut self) -> Option<Frame>;

    /// Give the device back.  Further reads return `None`.
    fn release(&mut self);
}

impl<T: Camera + ?Sized> Camera for Box<T> {
    fn read(&mut self) -> Option<Frame> { (**self).read() }
    fn release(&mut self) { (**self).release() }
}

// ════════════════════════════════════════════════════════════════════════════
// SyntheticCamera
// ════════════════════════════════════════════════════════════════════════════

const BACKDROP_TOP:    u32 = 0xFF30_3848;
const BACKDROP_BOTTOM: u32 = 0xFF10_1418;
const SCAN_COLOR:      u32 = 0xFF40_4C60;

/// Generated backdrop: a vertical gradient with a slowly moving scan line so
/// the window visibly updates.  Optionally stops after `frame_limit` frames.
pub struct SyntheticCamera {
    width:       u32,
    height:      u32,
    frame_limit: Option<u64>,
    produced:    u64,
    released:    bool,
    backdrop:    Frame,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32, frame_limit: Option<u64>) -> Self {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            let t = y as f32 / height.max(1) as f32;
            pixels.extend(std::iter::repeat(mix(BACKDROP_TOP, BACKDROP_BOTTOM, t)).take(width as usize));
        }
        let backdrop = Frame::from_pixels(width, height, pixels)
            .unwrap_or_else(|| Frame::filled(width, height, BACKDROP_BOTTOM));
        log::info!(
            "Synthetic camera {}x{} ({} frames)",
            width,
            height,
            frame_limit.map_or("unlimited".to_string(), |n| n.to_string())
        );
        SyntheticCamera { width, height, frame_limit, produced: 0, released: false, backdrop }
    }

    pub fn frames_produced(&self) -> u64 { self.produced }
    pub fn is_released(&self) -> bool { self.released }
}

impl Camera for SyntheticCamera {
    fn read(&mut self) -> Option<Frame> {
        if self.released || self.frame_limit.map_or(false, |n| self.produced >= n) {
            return None;
        }
        let mut frame = self.backdrop.clone();
        if self.height > 0 {
            let y = (self.produced % self.height as u64) as i32;
            for x in 0..self.width as i32 {
                frame.set_pixel(x, y, SCAN_COLOR);
            }
        }
        self.produced += 1;
        Some(frame)
    }

    fn release(&mut self) {
        if !self.released {
            log::info!("Synthetic camera released after {} frames", self.produced);
            self.released = true;
        }
    }
}

/// Linear blend of two ARGB colours, `t` = 0 gives `a`.
fn mix(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let ch = |shift: u32| {
        let ca = ((a >> shift) & 0xFF) as f32;
        let cb = ((b >> shift) & 0xFF) as f32;
        ((ca + (cb - ca) * t).round() as u32) << shift
    };
    0xFF00_0000 | ch(16) | ch(8) | ch(0)
}

// ════════════════════════════════════════════════════════════════════════════
// NokhwaCamera (feature = "webcam")
// ════════════════════════════════════════════════════════════════════════════

/// A native webcam opened through `nokhwa` at its highest resolution.
#[cfg(feature = "webcam")]
pub struct NokhwaCamera {
    camera:   Option<nokhwa::Camera>,
    index:    u32,
}

#[cfg(feature = "webcam")]
impl NokhwaCamera {
    pub fn open(index: u32) -> crate::error::Result<Self> {
        use nokhwa::pixel_format::RgbAFormat;
        use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};

        use crate::error::Error;

        let requested = RequestedFormat::new::<RgbAFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera = nokhwa::Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| Error::Camera(format!("cannot open camera {}: {}", index, e)))?;
        camera
            .open_stream()
            .map_err(|e| Error::Camera(format!("cannot start camera {}: {}", index, e)))?;

        log::info!(
            "Camera {} opened: {} ({}x{})",
            index,
            camera.info().human_name(),
            camera.resolution().width(),
            camera.resolution().height()
        );
        Ok(NokhwaCamera { camera: Some(camera), index })
    }
}

#[cfg(feature = "webcam")]
impl Camera for NokhwaCamera {
    fn read(&mut self) -> Option<Frame> {
        use nokhwa::pixel_format::RgbAFormat;

        let camera = self.camera.as_mut()?;
        let buffer = match camera.frame() {
            Ok(b)  => b,
            Err(e) => {
                log::warn!("Camera {}: frame capture failed: {}", self.index, e);
                return None;
            }
        };
        let res = buffer.resolution();
        match buffer.decode_image::<RgbAFormat>() {
            Ok(image) => Frame::from_rgba(res.width(), res.height(), &image.into_raw()),
            Err(e) => {
                log::warn!("Camera {}: frame decode failed: {}", self.index, e);
                None
            }
        }
    }

    fn release(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            if let Err(e) = camera.stop_stream() {
                log::warn!("Camera {}: stop failed: {}", self.index, e);
            }
            log::info!("Camera {} released", self.index);
        }
    }
}

#[cfg(feature = "webcam")]
impl Drop for NokhwaCamera {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_stops_at_limit() {
        let mut cam = SyntheticCamera::new(8, 6, Some(3));
        assert!(cam.read().is_some());
        assert!(cam.read().is_some());
        assert!(cam.read().is_some());
        assert!(cam.read().is_none());
        assert_eq!(cam.frames_produced(), 3);
    }

    #[test]
    fn released_camera_yields_nothing() {
        let mut cam = SyntheticCamera::new(8, 6, None);
        assert!(cam.read().is_some());
        cam.release();
        assert!(cam.is_released());
        assert!(cam.read().is_none());
    }

    #[test]
    fn frames_have_requested_size_and_moving_scan_line() {
        let mut cam = SyntheticCamera::new(8, 6, None);
        let a = cam.read().unwrap();
        let b = cam.read().unwrap();
        assert_eq!((a.width(), a.height()), (8, 6));
        assert_eq!(a.pixel(0, 0), Some(SCAN_COLOR));
        assert_eq!(b.pixel(0, 1), Some(SCAN_COLOR));
        assert_ne!(b.pixel(0, 0), Some(SCAN_COLOR));
    }

    #[test]
    fn mix_endpoints() {
        assert_eq!(mix(BACKDROP_TOP, BACKDROP_BOTTOM, 0.0), BACKDROP_TOP);
        assert_eq!(mix(BACKDROP_TOP, BACKDROP_BOTTOM, 1.0), BACKDROP_BOTTOM);
    }
}
