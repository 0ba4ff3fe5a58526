//! Frame-time graph
//!
//! Draws the rolling sample window as a line trace. Each render first
//! fades the previous contents with a translucent fill instead of
//! clearing them, leaving a short trail behind spikes.

use crate::pixel_surface::PixelSurface;
use crate::surface::Surface;
use crate::{Rgba, SurfaceError};
use glam::Vec2;
use overlay_metrics::RingBuffer;
use serde::{Deserialize, Serialize};

/// Vertical pixels per millisecond of frame time.
const SAMPLE_SCALE: f32 = 2.0;
/// Baseline lift as a fraction of the surface height.
const BASELINE_OFFSET: f32 = 0.1;
/// The trace enters from just left of the visible area.
const TRACE_START_X: f32 = -5.0;

/// Size and depth of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphLayout {
    /// Logical width in display units.
    pub width: u32,
    /// Logical height in display units.
    pub height: u32,
    /// Physical pixels per logical unit, fixed when the graph is built.
    pub pixel_ratio: f32,
    /// Number of samples kept, and number of slots across the width.
    pub capacity: usize,
}

impl Default for GraphLayout {
    fn default() -> Self {
        Self {
            width: 256,
            height: 36,
            pixel_ratio: 2.0,
            capacity: 128,
        }
    }
}

impl GraphLayout {
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width as f32 * self.pixel_ratio).round() as u32,
            (self.height as f32 * self.pixel_ratio).round() as u32,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphStyle {
    pub fade_color: Rgba,
    pub fade_alpha: f32,
    pub stroke_color: Rgba,
    pub line_width: f32,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            fade_color: Rgba::BLACK,
            fade_alpha: 0.25,
            stroke_color: Rgba::rgb(0xf5, 0x42, 0x6f),
            line_width: 2.0,
        }
    }
}

pub struct GraphRenderer<S: Surface = PixelSurface> {
    surface: S,
    samples: RingBuffer<f64>,
    style: GraphStyle,
}

impl GraphRenderer<PixelSurface> {
    /// Builds a graph on a software surface sized `layout.physical_size()`.
    pub fn new(layout: &GraphLayout) -> Result<Self, SurfaceError> {
        let (width, height) = layout.physical_size();
        let surface = PixelSurface::new(width, height)?;
        tracing::debug!(width, height, capacity = layout.capacity, "graph surface created");
        Ok(Self::with_surface(surface, layout.capacity))
    }
}

impl<S: Surface> GraphRenderer<S> {
    pub fn with_surface(surface: S, capacity: usize) -> Self {
        Self {
            surface,
            samples: RingBuffer::new(capacity),
            style: GraphStyle::default(),
        }
    }

    /// Appends a frame time in milliseconds, evicting the oldest once full.
    pub fn update(&mut self, sample: f64) {
        self.samples.push(sample);
    }

    pub fn render(&mut self) {
        let bounds = self.surface.bounds();

        self.surface.set_global_alpha(self.style.fade_alpha);
        self.surface.fill_rect(bounds, self.style.fade_color);

        self.surface.set_global_alpha(1.0);
        let points = self.trace_points();
        self.surface
            .stroke_polyline(&points, self.style.line_width, self.style.stroke_color);
    }

    /// Polyline for the current window in physical pixels.
    ///
    /// Slots are spaced by capacity, not by the number of samples held, so
    /// a partially filled window only covers the left part of the graph.
    /// Empty slots produce no point.
    pub fn trace_points(&self) -> Vec<Vec2> {
        let width = self.surface.width() as f32;
        let height = self.surface.height() as f32;
        let spacing = width / self.samples.capacity() as f32;

        let mut points = Vec::with_capacity(self.samples.len() + 1);
        points.push(Vec2::new(TRACE_START_X, height / 2.0));
        for slot in 0..self.samples.capacity() {
            let Some(&sample) = self.samples.get(slot) else {
                continue;
            };
            let scaled = sample as f32 * SAMPLE_SCALE - height * BASELINE_OFFSET;
            points.push(Vec2::new(slot as f32 * spacing, height - scaled));
        }
        points
    }

    pub fn samples(&self) -> &RingBuffer<f64> {
        &self.samples
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
