//! Overlay Core
//!
//! The debug overlay itself:
//! - Configuration with named defaults
//! - Text reporting throttled to a refresh interval
//! - Loop status indicator and log line
//! - [`DebugOverlay`], the per-frame entry point for the host loop

pub mod config;
pub mod loop_status;
pub mod overlay;
pub mod style;
pub mod text_reporter;

pub use config::{ConfigError, OverlayConfig};
pub use overlay::{DebugOverlay, DebugOverlayBuilder, OverlayError};
pub use text_reporter::TextReporter;

pub use overlay_display as display;
pub use overlay_metrics as metrics;
pub use overlay_render as render;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
