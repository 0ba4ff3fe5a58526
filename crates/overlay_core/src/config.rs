//! Overlay configuration
//!
//! Read once when the overlay is built. Keys are camelCase so a host can
//! pass `{"overlayOn": true, "graphOn": true}` straight through.

use overlay_render::GraphLayout;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONTAINER_ID: &str = "debug-container";
pub const DEFAULT_REFRESH_INTERVAL_MS: f64 = 250.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("refresh interval must be a positive number of milliseconds, got {0}")]
    InvalidRefreshInterval(f64),

    #[error("graph must keep at least one sample")]
    EmptyCapacity,

    #[error("graph size {width}x{height} has no area")]
    EmptyGraph { width: u32, height: u32 },

    #[error("pixel ratio must be a positive finite number, got {0}")]
    InvalidPixelRatio(f32),

    #[error("container id must not be empty")]
    EmptyContainerId,

    #[error("malformed overlay config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    /// Log every loop start/stop, independent of the overlay.
    pub loop_status_log_on: bool,
    /// Build the visible overlay at all.
    pub overlay_on: bool,
    /// Add the frame-time graph (only with `overlay_on`).
    pub graph_on: bool,
    /// One text row instead of labelled rows.
    pub is_compact: bool,
    pub refresh_interval_ms: f64,
    pub container_id: String,
    pub graph: GraphLayout,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            loop_status_log_on: true,
            overlay_on: false,
            graph_on: false,
            is_compact: true,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            graph: GraphLayout::default(),
        }
    }
}

impl OverlayConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: OverlayConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.refresh_interval_ms.is_finite() && self.refresh_interval_ms > 0.0) {
            return Err(ConfigError::InvalidRefreshInterval(self.refresh_interval_ms));
        }
        if self.container_id.is_empty() {
            return Err(ConfigError::EmptyContainerId);
        }
        let graph = &self.graph;
        if graph.capacity == 0 {
            return Err(ConfigError::EmptyCapacity);
        }
        if !(graph.pixel_ratio.is_finite() && graph.pixel_ratio > 0.0) {
            return Err(ConfigError::InvalidPixelRatio(graph.pixel_ratio));
        }
        let (width, height) = graph.physical_size();
        if graph.width == 0 || graph.height == 0 || width == 0 || height == 0 {
            return Err(ConfigError::EmptyGraph {
                width: graph.width,
                height: graph.height,
            });
        }
        Ok(())
    }

    pub fn graph_enabled(&self) -> bool {
        self.overlay_on && self.graph_on
    }
}
