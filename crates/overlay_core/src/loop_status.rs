//! Loop start/stop log line
//!
//! Emitted as a structured `tracing` event under the `overlay::loop_status`
//! target, carrying the badge styling a console sink can render.

pub const LOG_TARGET: &str = "overlay::loop_status";
const LOG_FONT: &str = "font-size:14px;font-family:'Roboto Mono',monospace;";

/// Styling of the status badge in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopBadge {
    pub background: &'static str,
    pub padding_right: u8,
}

impl LoopBadge {
    pub fn for_status(running: bool) -> Self {
        if running {
            Self {
                background: "#68F48E",
                padding_right: 14,
            }
        } else {
            Self {
                background: "#FF6B6B",
                padding_right: 6,
            }
        }
    }
}

pub fn log_loop_status(running: bool) {
    let badge = LoopBadge::for_status(running);
    tracing::info!(
        target: LOG_TARGET,
        running,
        background = badge.background,
        padding_right = badge.padding_right,
        font = LOG_FONT,
        "loop: {running}"
    );
}
