//! Z-buffered triangle fill into a packed-pixel canvas.

use glam::Vec3;

/// Colour plus depth buffer.  Pixels are `0xAARRGGBB`, row-major, the layout
/// `minifb::Window::update_with_buffer` expects.
pub struct Canvas {
    width:  usize,
    height: usize,
    color:  Vec<u32>,
    depth:  Vec<f32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            color: vec![0; width * height],
            depth: vec![f32::INFINITY; width * height],
        }
    }

    pub fn width(&self)  -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn clear(&mut self, color: u32) {
        self.color.fill(color);
        self.depth.fill(f32::INFINITY);
    }

    /// Colour at `(x, y)`; 0 outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.color[y * self.width + x]
        } else {
            0
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.color
    }

    /// Fill a triangle given in screen space (x, y in pixels, z in `[0, 1]`
    /// depth).  Either winding is accepted.  A pixel is written when its
    /// centre is inside the triangle and nearer than what is already there.
    pub fn fill_triangle(&mut self, v: [Vec3; 3], color: u32) {
        let area = edge(v[0], v[1], v[2].x, v[2].y);
        if area.abs() < 1e-8 {
            return;
        }

        let min_x = v[0].x.min(v[1].x).min(v[2].x).floor().max(0.0);
        let min_y = v[0].y.min(v[1].y).min(v[2].y).floor().max(0.0);
        let max_x = v[0].x.max(v[1].x).max(v[2].x).ceil().min(self.width as f32 - 1.0);
        let max_y = v[0].y.max(v[1].y).max(v[2].y).ceil().min(self.height as f32 - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        for y in min_y as usize..=max_y as usize {
            let py = y as f32 + 0.5;
            for x in min_x as usize..=max_x as usize {
                let px = x as f32 + 0.5;
                let w0 = edge(v[1], v[2], px, py) / area;
                let w1 = edge(v[2], v[0], px, py) / area;
                let w2 = edge(v[0], v[1], px, py) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let z = w0 * v[0].z + w1 * v[1].z + w2 * v[2].z;
                let i = y * self.width + x;
                if z < self.depth[i] {
                    self.depth[i] = z;
                    self.color[i] = color;
                }
            }
        }
    }
}

/// Twice the signed area of (a, b, p).
fn edge(a: Vec3, b: Vec3, px: f32, py: f32) -> f32 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

/// Multiply the RGB channels of `argb` by `k` in `[0, 1]`.
pub fn shade(argb: u32, k: f32) -> u32 {
    let k = k.clamp(0.0, 1.0);
    let ch = |shift: u32| ((((argb >> shift) & 0xFF) as f32 * k).round() as u32) << shift;
    (argb & 0xFF00_0000) | ch(16) | ch(8) | ch(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED:  u32 = 0xFFFF_0000;
    const BLUE: u32 = 0xFF00_00FF;

    fn tri(z: f32) -> [Vec3; 3] {
        [Vec3::new(1.0, 1.0, z), Vec3::new(9.0, 1.0, z), Vec3::new(1.0, 9.0, z)]
    }

    #[test]
    fn fills_inside_only() {
        let mut c = Canvas::new(10, 10);
        c.fill_triangle(tri(0.5), RED);
        assert_eq!(c.pixel(2, 2), RED);
        assert_eq!(c.pixel(8, 8), 0);
        assert_eq!(c.pixel(0, 0), 0);
    }

    #[test]
    fn winding_does_not_matter() {
        let mut c = Canvas::new(10, 10);
        let [a, b, d] = tri(0.5);
        c.fill_triangle([a, d, b], RED);
        assert_eq!(c.pixel(2, 2), RED);
    }

    #[test]
    fn nearer_triangle_wins_in_any_order() {
        let mut c = Canvas::new(10, 10);
        c.fill_triangle(tri(0.3), RED);
        c.fill_triangle(tri(0.6), BLUE);
        assert_eq!(c.pixel(2, 2), RED);

        c.clear(0);
        c.fill_triangle(tri(0.6), BLUE);
        c.fill_triangle(tri(0.3), RED);
        assert_eq!(c.pixel(2, 2), RED);
    }

    #[test]
    fn offscreen_triangle_is_ignored() {
        let mut c = Canvas::new(10, 10);
        let far = [Vec3::new(-30.0, -30.0, 0.5), Vec3::new(-20.0, -30.0, 0.5), Vec3::new(-30.0, -20.0, 0.5)];
        c.fill_triangle(far, RED);
        assert!(c.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn shade_keeps_alpha() {
        assert_eq!(shade(0xFF80_4020, 0.5), 0xFF40_2010);
        assert_eq!(shade(0xFFE6_E6E6, 1.0), 0xFFE6_E6E6);
        assert_eq!(shade(0xFFE6_E6E6, 0.0), 0xFF00_0000);
    }
}
