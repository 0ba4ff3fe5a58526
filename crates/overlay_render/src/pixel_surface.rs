//! Software RGBA8 surface
//!
//! Source-over blending with straight alpha, one `Rgba` per pixel in
//! row-major order. Strokes are rasterized by stamping discs along each
//! segment into a coverage mask, so overlapping stamps blend only once.
//! Segments are clipped to the surface grown by the stroke radius before
//! stamping, so the work per stroke is bounded by the surface size.

use crate::surface::{Rect, Surface};
use crate::{Rgba, SurfaceError};
use glam::Vec2;

pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    global_alpha: f32,
}

impl PixelSurface {
    /// Creates a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::EmptySurface { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width as usize * height as usize],
            global_alpha: 1.0,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.offset(x, y)])
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA8 bytes, ready for a texture upload or an image encoder.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn blend(&mut self, index: usize, color: Rgba) {
        let src_a = color.a as f32 / 255.0 * self.global_alpha;
        if src_a <= 0.0 {
            return;
        }
        let dst = self.pixels[index];
        let dst_a = dst.a as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        let channel = |s: u8, d: u8| -> u8 {
            let value = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
            value.round().clamp(0.0, 255.0) as u8
        };

        self.pixels[index] = Rgba::new(
            channel(color.r, dst.r),
            channel(color.g, dst.g),
            channel(color.b, dst.b),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        );
    }

    fn stamp(&self, mask: &mut [bool], center: Vec2, radius: f32) {
        let min_x = (center.x - radius).floor().max(0.0) as i64;
        let min_y = (center.y - radius).floor().max(0.0) as i64;
        let max_x = ((center.x + radius).ceil() as i64).min(self.width as i64 - 1);
        let max_y = ((center.y + radius).ceil() as i64).min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let pixel_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if pixel_center.distance_squared(center) <= radius * radius {
                    mask[self.offset(x as u32, y as u32)] = true;
                }
            }
        }
    }
}

impl Surface for PixelSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) };
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let x0 = rect.x.max(0.0).round() as u32;
        let y0 = rect.y.max(0.0).round() as u32;
        let x1 = ((rect.x + rect.width).round().max(0.0) as u32).min(self.width);
        let y1 = ((rect.y + rect.height).round().max(0.0) as u32).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let index = self.offset(x, y);
                self.blend(index, color);
            }
        }
    }

    fn stroke_polyline(&mut self, points: &[Vec2], line_width: f32, color: Rgba) {
        let points: Vec<Vec2> = points.iter().copied().filter(|p| p.is_finite()).collect();
        if points.is_empty() || line_width <= 0.0 {
            return;
        }

        let radius = (line_width / 2.0).max(0.5);
        let mut mask = vec![false; self.pixels.len()];

        if points.len() == 1 {
            self.stamp(&mut mask, points[0], radius);
        }
        let min = Vec2::splat(-radius);
        let max = Vec2::new(self.width as f32, self.height as f32) + radius;
        for segment in points.windows(2) {
            let Some((start, end)) = clip_segment(segment[0], segment[1], min, max) else {
                continue;
            };
            let steps = (start.distance(end) * 2.0).ceil().max(1.0) as usize;
            for step in 0..=steps {
                let t = step as f32 / steps as f32;
                self.stamp(&mut mask, start.lerp(end, t), radius);
            }
        }

        for (index, covered) in mask.iter().enumerate() {
            if *covered {
                self.blend(index, color);
            }
        }
    }
}

/// Liang-Barsky clip of `start..end` against the box `min..max`.
fn clip_segment(start: Vec2, end: Vec2, min: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    let delta = end - start;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [
        (-delta.x, start.x - min.x),
        (delta.x, max.x - start.x),
        (-delta.y, start.y - min.y),
        (delta.y, max.y - start.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((start + delta * t0, start + delta * t1))
}
