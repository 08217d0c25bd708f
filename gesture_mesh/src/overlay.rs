//! Drawing on top of camera frames: hand skeletons and status text.

use hand_gesture::{HandObservation, HAND_CONNECTIONS};

use crate::frame::Frame;

pub const TEXT_COLOR:       u32 = 0xFF00_FF00;
pub const LANDMARK_COLOR:   u32 = 0xFFFF_0000;
pub const CONNECTION_COLOR: u32 = 0xFFE0_E0E0;

const LANDMARK_RADIUS: i32 = 3;

/// Glyph cell is 3×5 pixels plus one column of spacing, before scaling.
const GLYPH_W: i32 = 3;
const GLYPH_H: i32 = 5;

/// Draw `text` with its top-left corner at `pos`, each font pixel blown up
/// to a `scale`×`scale` block.  Characters running off the right edge are
/// dropped.
pub fn draw_text(frame: &mut Frame, text: &str, pos: (i32, i32), color: u32, scale: i32) {
    let scale = scale.max(1);
    let advance = (GLYPH_W + 1) * scale;
    let mut x = pos.0;
    for ch in text.chars() {
        if x >= frame.width() as i32 {
            break;
        }
        for (row, &bits) in glyph(ch).iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                    fill_block(frame, x + col * scale, pos.1 + row as i32 * scale, scale, color);
                }
            }
        }
        x += advance;
    }
}

/// Height in pixels of one line of text at `scale`.
pub fn text_height(scale: i32) -> i32 {
    GLYPH_H * scale.max(1)
}

fn fill_block(frame: &mut Frame, x: i32, y: i32, size: i32, color: u32) {
    for dy in 0..size {
        for dx in 0..size {
            frame.set_pixel(x + dx, y + dy, color);
        }
    }
}

/// Bresenham line, `thickness` pixels wide.  The segment is clipped to the
/// frame before stepping, so far off-screen endpoints cost nothing.
pub fn draw_line(frame: &mut Frame, from: (i32, i32), to: (i32, i32), color: u32, thickness: i32) {
    let thickness = thickness.max(1);
    let pad = thickness as f64;
    let clipped = clip_segment(
        (from.0 as f64, from.1 as f64),
        (to.0 as f64, to.1 as f64),
        (-pad, -pad),
        (frame.width() as f64 + pad, frame.height() as f64 + pad),
    );
    let (a, b) = match clipped {
        Some(seg) => seg,
        None => return,
    };
    let (mut x, mut y) = (a.0.round() as i32, a.1.round() as i32);
    let to = (b.0.round() as i32, b.1.round() as i32);

    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;
    let half = thickness / 2;
    loop {
        fill_block(frame, x - half, y - half, thickness, color);
        if (x, y) == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Liang-Barsky: the part of `a`..`b` inside the box `lo`..`hi`, if any.
fn clip_segment(
    a:  (f64, f64),
    b:  (f64, f64),
    lo: (f64, f64),
    hi: (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [(-dx, a.0 - lo.0), (dx, hi.0 - a.0), (-dy, a.1 - lo.1), (dy, hi.1 - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some(((a.0 + t0 * dx, a.1 + t0 * dy), (a.0 + t1 * dx, a.1 + t1 * dy)))
}

pub fn fill_circle(frame: &mut Frame, center: (i32, i32), radius: i32, color: u32) {
    let r = radius.max(0) as i64;
    let (cx, cy) = (center.0 as i64, center.1 as i64);
    let (w, h) = (frame.width() as i64, frame.height() as i64);
    if cx + r < 0 || cy + r < 0 || cx - r >= w || cy - r >= h {
        return;
    }
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                frame.set_pixel((cx + dx) as i32, (cy + dy) as i32, color);
            }
        }
    }
}

/// Skeleton connections, then a dot on every landmark.  Landmarks without a
/// finite pixel position are left out.
pub fn draw_landmarks(frame: &mut Frame, hand: &HandObservation) {
    let (w, h) = (frame.width(), frame.height());
    let px = |i: usize| {
        let (x, y) = hand.landmark(i).to_pixels(w, h);
        if x.is_finite() && y.is_finite() {
            Some((x.round() as i32, y.round() as i32))
        } else {
            None
        }
    };
    for &(a, b) in HAND_CONNECTIONS.iter() {
        if let (Some(from), Some(to)) = (px(a), px(b)) {
            draw_line(frame, from, to, CONNECTION_COLOR, 2);
        }
    }
    for i in 0..hand.landmarks.len() {
        if let Some(center) = px(i) {
            fill_circle(frame, center, LANDMARK_RADIUS, LANDMARK_COLOR);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 3×5 bitmap font, one row per byte, high bit on the left
// ────────────────────────────────────────────────────────────────────────────

fn glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        ' ' => [0; 5],
        _   => [0b111, 0b001, 0b011, 0b000, 0b010],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_gesture::synth;
    use hand_gesture::{HandSide, Landmark, LANDMARK_COUNT};

    const BG: u32 = 0xFF00_0000;

    fn lit(frame: &Frame, color: u32) -> usize {
        frame.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn text_is_drawn_at_position_and_scale() {
        let mut f = Frame::filled(40, 20, BG);
        draw_text(&mut f, "L", (2, 3), TEXT_COLOR, 2);
        // 'L' is 5 + 2 font pixels, each a 2×2 block.
        assert_eq!(lit(&f, TEXT_COLOR), 7 * 4);
        assert_eq!(f.pixel(2, 3), Some(TEXT_COLOR));
        assert_eq!(f.pixel(1, 3), Some(BG));
        assert_eq!(text_height(2), 10);
    }

    #[test]
    fn text_is_clipped_not_wrapped() {
        let mut f = Frame::filled(10, 10, BG);
        draw_text(&mut f, "Right Hand: Fist Closed", (0, 0), TEXT_COLOR, 4);
        draw_text(&mut f, "X", (-100, -100), TEXT_COLOR, 4);
        assert!(lit(&f, TEXT_COLOR) > 0);
    }

    #[test]
    fn lowercase_matches_uppercase() {
        assert_eq!(glyph('q'), glyph('Q'));
    }

    #[test]
    fn line_reaches_both_ends() {
        let mut f = Frame::filled(10, 10, BG);
        draw_line(&mut f, (1, 8), (8, 2), CONNECTION_COLOR, 1);
        assert_eq!(f.pixel(1, 8), Some(CONNECTION_COLOR));
        assert_eq!(f.pixel(8, 2), Some(CONNECTION_COLOR));
    }

    #[test]
    fn far_off_screen_line_is_clipped() {
        let mut f = Frame::filled(64, 48, BG);
        draw_line(&mut f, (i32::MIN, 5), (i32::MAX, 5), CONNECTION_COLOR, 1);
        assert_eq!(f.pixel(0, 5), Some(CONNECTION_COLOR));
        assert_eq!(f.pixel(63, 5), Some(CONNECTION_COLOR));
        assert_eq!(lit(&f, CONNECTION_COLOR), 64);

        let mut g = Frame::filled(64, 48, BG);
        draw_line(&mut g, (-1_000_000, -10), (1_000_000, -10), CONNECTION_COLOR, 2);
        draw_line(&mut g, (i32::MAX, i32::MAX), (i32::MAX - 1, i32::MIN), CONNECTION_COLOR, 2);
        assert_eq!(lit(&g, CONNECTION_COLOR), 0);
    }

    #[test]
    fn far_off_screen_circle_is_skipped() {
        let mut f = Frame::filled(64, 48, BG);
        fill_circle(&mut f, (i32::MAX, i32::MIN), LANDMARK_RADIUS, LANDMARK_COLOR);
        fill_circle(&mut f, (-2, 10), LANDMARK_RADIUS, LANDMARK_COLOR);
        assert_eq!(f.pixel(0, 10), Some(LANDMARK_COLOR));
        assert_eq!(f.pixel(1, 10), Some(LANDMARK_COLOR));
    }

    #[test]
    fn out_of_range_landmarks_do_not_stall_drawing() {
        let mut points = [Landmark::new(0.1, 0.1); LANDMARK_COUNT];
        points[0] = Landmark::new(-1e7, 0.5);
        points[1] = Landmark::new(1e7, 0.5);
        points[2] = Landmark::new(f32::NAN, 0.2);
        let hand = HandObservation::new(HandSide::Right, points);

        let mut f = Frame::filled(64, 48, BG);
        draw_landmarks(&mut f, &hand);
        for x in [0, 32, 63] {
            assert_eq!(f.pixel(x, 24), Some(CONNECTION_COLOR), "x = {}", x);
        }
        assert_eq!(f.pixel(6, 5), Some(LANDMARK_COLOR));
    }

    #[test]
    fn landmarks_drawn_on_frame() {
        let mut f = Frame::filled(320, 240, BG);
        let hand = synth::open_hand(HandSide::Right, (0.5, 0.9));
        draw_landmarks(&mut f, &hand);
        assert_eq!(f.pixel(160, 216), Some(LANDMARK_COLOR));
        assert!(lit(&f, CONNECTION_COLOR) > 0);
    }
}
