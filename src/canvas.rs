//! Drawing surface over an RGBA frame, with the anti-aliased circle
//! primitives the widgets are painted with.

use crate::config::Color;
use crate::joystick::{Circle, Vec2};

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// Alpha-blend a single pixel. Out-of-bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        let src = [color.r as f32, color.g as f32, color.b as f32, 255.0 * alpha];
        let dst = [
            self.frame[idx] as f32,
            self.frame[idx + 1] as f32,
            self.frame[idx + 2] as f32,
            self.frame[idx + 3] as f32,
        ];
        let a = src[3] / 255.0;
        let out = [
            (src[0] * a + dst[0] * (1.0 - a)).round() as u8,
            (src[1] * a + dst[1] * (1.0 - a)).round() as u8,
            (src[2] * a + dst[2] * (1.0 - a)).round() as u8,
            0xff,
        ];
        self.frame[idx..idx + 4].copy_from_slice(&out);
    }

    /// Anti-aliased filled disc.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color, opacity: f32) {
        let min_x = (cx - radius).floor() as i32 - 1;
        let max_x = (cx + radius).ceil() as i32 + 1;
        let min_y = (cy - radius).floor() as i32 - 1;
        let max_y = (cy + radius).ceil() as i32 + 1;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dist = (x as f64 - cx).hypot(y as f64 - cy);
                let aa = if dist > radius {
                    1.0 - (dist - radius).min(1.0)
                } else {
                    1.0
                };
                if aa > 0.0 {
                    self.set_pixel(x, y, color, aa as f32 * opacity);
                }
            }
        }
    }

    /// Anti-aliased circle outline, `thickness` pixels deep measured
    /// inward from `radius`.
    pub fn stroke_circle(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        thickness: f64,
        color: Color,
        opacity: f32,
    ) {
        let inner = radius - thickness;
        let min_x = (cx - radius).floor() as i32 - 1;
        let max_x = (cx + radius).ceil() as i32 + 1;
        let min_y = (cy - radius).floor() as i32 - 1;
        let max_y = (cy + radius).ceil() as i32 + 1;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dist = (x as f64 - cx).hypot(y as f64 - cy);
                let aa = if dist > radius {
                    1.0 - (dist - radius).min(1.0)
                } else if dist < inner {
                    1.0 - (inner - dist).min(1.0)
                } else {
                    1.0
                };
                if dist >= inner - 1.0 && dist <= radius + 1.0 && aa > 0.0 {
                    self.set_pixel(x, y, color, aa as f32 * opacity);
                }
            }
        }
    }

    /// Paint a circle's fill and outline, each only when its color is
    /// present.
    pub fn paint_circle(&mut self, offset: Vec2, circle: &Circle, opacity: f32) {
        let cx = offset.x + circle.pos.x;
        let cy = offset.y + circle.pos.y;
        if let Some(fill) = circle.fill {
            self.fill_circle(cx, cy, circle.radius, fill, opacity);
        }
        if let Some(outline) = circle.outline {
            self.stroke_circle(cx, cy, circle.radius, circle.outline_width, outline, opacity);
        }
    }
}
