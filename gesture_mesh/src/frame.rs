//! Video frame as a packed pixel buffer.

/// One captured image.  Pixels are `0xAARRGGBB`, row-major, which is what
/// `minifb` draws directly.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width:  u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Frame {
    /// Frame filled with one colour.
    pub fn filled(width: u32, height: u32, color: u32) -> Self {
        Frame { width, height, pixels: vec![color; (width * height) as usize] }
    }

    /// `None` unless `pixels` holds exactly `width * height` entries.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Option<Self> {
        (pixels.len() == (width * height) as usize).then_some(Frame { width, height, pixels })
    }

    /// Pack interleaved RGBA bytes (4 per pixel).
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Option<Self> {
        if rgba.len() != (width * height) as usize * 4 {
            return None;
        }
        let pixels = rgba
            .chunks_exact(4)
            .map(|p| 0xFF00_0000 | (p[0] as u32) << 16 | (p[1] as u32) << 8 | p[2] as u32)
            .collect();
        Some(Frame { width, height, pixels })
    }

    pub fn width(&self)  -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn pixels(&self) -> &[u32] { &self.pixels }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Write one pixel; coordinates outside the frame are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            self.pixels[(y as u32 * self.width + x as u32) as usize] = color;
        }
    }

    /// Flip left-right in place, so the image reads like a mirror.
    pub fn mirror_horizontal(&mut self) {
        let w = self.width as usize;
        if w == 0 {
            return;
        }
        for row in self.pixels.chunks_exact_mut(w) {
            row.reverse();
        }
    }

    /// Interleaved RGB bytes, 3 per pixel, alpha dropped.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for &p in &self.pixels {
            out.extend_from_slice(&[(p >> 16) as u8, (p >> 8) as u8, p as u8]);
        }
        out
    }
}
