//! Render surface contract
//!
//! The few primitives the graph needs. Like a 2D canvas context, the
//! surface carries a global alpha that applies to every fill and stroke
//! until it is changed.

use crate::Rgba;
use glam::Vec2;

/// Axis-aligned rectangle in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

pub trait Surface {
    /// Physical width in pixels.
    fn width(&self) -> u32;

    /// Physical height in pixels.
    fn height(&self) -> u32;

    fn global_alpha(&self) -> f32;

    /// Clamped to `0.0..=1.0`.
    fn set_global_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Strokes the open polyline through `points` in order.
    fn stroke_polyline(&mut self, points: &[Vec2], line_width: f32, color: Rgba);

    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32)
    }
}
