//! Primitive rasterization: lines, rectangles and filled circles.
//!
//! Every primitive alpha-blends, so translucent marks (scatter points at 0.3 opacity) compose
//! the way they do in a browser. Coordinates are surface pixels; anything off-surface is clipped.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;

/// Trait for drawable primitives.
pub trait Drawable {
    /// Draw this primitive to a framebuffer.
    fn draw(&self, fb: &mut Framebuffer, color: Rgba);
}

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a 1px line using Bresenham's algorithm.
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        if x >= 0 && y >= 0 {
            fb.blend_pixel(x as u32, y as u32, color);
        }
        if x == x1 && y == y1 {
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

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Fill `rect`, rounding its edges to whole pixels.
pub fn draw_rect(fb: &mut Framebuffer, rect: &Rect, color: Rgba) {
    let x0 = rect.x.round().max(0.0);
    let y0 = rect.y.round().max(0.0);
    let x1 = rect.x1().round();
    let y1 = rect.y1().round();
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    fb.blend_rect(
        x0 as u32,
        y0 as u32,
        (x1 - x0) as u32,
        (y1 - y0) as u32,
        color,
    );
}

/// Stroke the inside edge of `rect` with a border `thickness` pixels wide (at least 1).
pub fn draw_rect_outline(fb: &mut Framebuffer, rect: &Rect, color: Rgba, thickness: f32) {
    let t = thickness.round().max(1.0);
    if rect.width <= 2.0 * t || rect.height <= 2.0 * t {
        draw_rect(fb, rect, color);
        return;
    }
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
    draw_rect(fb, &Rect::new(x, y, w, t), color);
    draw_rect(fb, &Rect::new(x, y + h - t, w, t), color);
    draw_rect(fb, &Rect::new(x, y + t, t, h - 2.0 * t), color);
    draw_rect(fb, &Rect::new(x + w - t, y + t, t, h - 2.0 * t), color);
}

impl Drawable for Rect {
    fn draw(&self, fb: &mut Framebuffer, color: Rgba) {
        draw_rect(fb, self, color);
    }
}

// ============================================================================
// Circle Drawing
// ============================================================================

/// Draw a filled circle, one blended span per scanline so no pixel is covered twice.
pub fn draw_circle(fb: &mut Framebuffer, cx: f32, cy: f32, radius: f32, color: Rgba) {
    if !(cx.is_finite() && cy.is_finite()) {
        return;
    }
    let (cx, cy) = (cx.round() as i32, cy.round() as i32);
    let r = radius.round() as i32;
    if r <= 0 {
        if cx >= 0 && cy >= 0 {
            fb.blend_pixel(cx as u32, cy as u32, color);
        }
        return;
    }

    let r2 = (r * r) as f32;
    for dy in -r..=r {
        let y = cy + dy;
        if y < 0 || y >= fb.height() as i32 {
            continue;
        }
        let half = (r2 - (dy * dy) as f32).sqrt().floor() as i32;
        let x_start = (cx - half).max(0);
        let x_end = (cx + half + 1).min(fb.width() as i32);
        if x_start < x_end {
            fb.blend_rect(x_start as u32, y as u32, (x_end - x_start) as u32, 1, color);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Framebuffer {
        let mut fb = Framebuffer::new(100, 100).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);
        fb
    }

    #[test]
    fn test_draw_line_horizontal() {
        let mut fb = canvas();
        draw_line(&mut fb, 10, 50, 90, 50, Rgba::BLACK);
        assert_eq!(fb.get_pixel(10, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(90, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 51), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_line_diagonal() {
        let mut fb = canvas();
        draw_line(&mut fb, 0, 0, 20, 20, Rgba::RED);
        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::RED));
    }

    #[test]
    fn test_line_out_of_bounds() {
        let mut fb = canvas();
        draw_line(&mut fb, -50, -50, 150, 150, Rgba::RED);
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::RED));
    }

    #[test]
    fn test_draw_rect() {
        let mut fb = canvas();
        draw_rect(&mut fb, &Rect::new(10.0, 10.0, 20.0, 20.0), Rgba::RED);
        assert_eq!(fb.get_pixel(15, 15), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(30, 30), Some(Rgba::WHITE));

        Rect::new(-10.0, -10.0, 15.0, 15.0).draw(&mut fb, Rgba::BLACK);
        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_rect_outline() {
        let mut fb = canvas();
        draw_rect_outline(
            &mut fb,
            &Rect::new(10.0, 10.0, 30.0, 30.0),
            Rgba::BLACK,
            3.0,
        );
        assert_eq!(fb.get_pixel(11, 25), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(25, 38), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(25, 25), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_circle_translucent_blends_once() {
        let mut fb = canvas();
        draw_circle(&mut fb, 50.0, 50.0, 3.0, Rgba::BLACK.with_opacity(0.3));
        let center = fb.get_pixel(50, 50).unwrap();
        let edge = fb.get_pixel(53, 50).unwrap();
        assert_eq!(center, edge);
        assert!(center.r < 255 && center.r > 150);
        assert_eq!(fb.get_pixel(54, 50), Some(Rgba::WHITE));
    }

    #[test]
    fn test_circle_zero_radius_and_nan() {
        let mut fb = canvas();
        draw_circle(&mut fb, 5.0, 5.0, 0.0, Rgba::RED);
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::RED));
        draw_circle(&mut fb, f32::NAN, 5.0, 3.0, Rgba::BLACK);
    }
}
