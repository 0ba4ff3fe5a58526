//! Simulated host animation loop

use anyhow::{Context, Result};
use overlay_core::display::{dispatch_click, Document, SharedDocument};
use image::{ImageFormat, RgbaImage};
use overlay_core::render::{PixelSurface, Surface};
use overlay_core::{DebugOverlay, OverlayConfig, OverlayError};
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

/// ~60 Hz frame budget
const FRAME_DURATION: Duration = Duration::from_micros(16_666);
/// Every this many frames the simulated work takes three budgets.
const SPIKE_EVERY: u32 = 45;

pub struct Host {
    document: SharedDocument,
    overlay: DebugOverlay,
    running: bool,
    toggle_requested: Rc<Cell<bool>>,
}

impl Host {
    pub fn new(config: OverlayConfig) -> Result<Self, OverlayError> {
        let document = Document::shared();
        let toggle_requested = Rc::new(Cell::new(false));

        let flag = toggle_requested.clone();
        let overlay = DebugOverlay::builder(config)
            .with_document(document.clone())
            .with_loop_toggle(move || flag.set(true))
            .build()?;

        Ok(Self {
            document,
            overlay,
            running: false,
            toggle_requested,
        })
    }

    /// Runs `frames` iterations, pausing at a third and resuming at half way.
    pub fn run(&mut self, frames: u32) {
        self.start();
        for frame in 0..frames {
            if frame > 0 && (frame == frames / 3 || frame == frames / 2) {
                self.click_indicator();
            }
            if self.toggle_requested.replace(false) {
                self.toggle();
            }

            if !self.running {
                thread::sleep(FRAME_DURATION);
                continue;
            }
            thread::sleep(frame_cost(frame));
            self.overlay.update();
        }
        self.stop();

        let sample = self.overlay.sample();
        let latest_ms = self
            .overlay
            .graph()
            .and_then(|graph| graph.samples().latest().copied());
        tracing::info!(
            frame_time_ms = sample.frame_time_ms,
            frame_rate_hz = sample.frame_rate_hz,
            ?latest_ms,
            "loop finished"
        );
    }

    fn start(&mut self) {
        self.running = true;
        self.overlay.loop_status(true);
    }

    fn stop(&mut self) {
        self.running = false;
        self.overlay.loop_status(false);
    }

    fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Clicks the loop indicator, or toggles directly when it is hidden.
    fn click_indicator(&self) {
        match self.overlay.loop_indicator() {
            Some(indicator) => {
                dispatch_click(&self.document, indicator);
            }
            None => self.toggle_requested.set(true),
        }
    }

    pub fn outline(&self) -> Option<String> {
        let container = self.overlay.container()?;
        Some(self.document.borrow().outline(container))
    }

    /// Writes the graph surface to `path` as a PNG.
    pub fn dump_graph(&self, path: &Path) -> Result<()> {
        let Some(graph) = self.overlay.graph() else {
            tracing::warn!("graph is disabled, nothing to dump");
            return Ok(());
        };
        graph_image(graph.surface())?
            .save_with_format(path, ImageFormat::Png)
            .context("failed to encode PNG")?;
        tracing::info!(path = %path.display(), "graph written");
        Ok(())
    }
}

fn frame_cost(frame: u32) -> Duration {
    if frame % SPIKE_EVERY == SPIKE_EVERY - 1 {
        FRAME_DURATION * 3
    } else {
        FRAME_DURATION
    }
}

fn graph_image(surface: &PixelSurface) -> Result<RgbaImage> {
    RgbaImage::from_raw(surface.width(), surface.height(), surface.as_bytes().to_vec())
        .context("surface size does not match its pixel buffer")
}
