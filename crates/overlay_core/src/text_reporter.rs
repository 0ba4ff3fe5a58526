//! Frame rate and frame time text, refreshed at a bounded rate
//!
//! The host calls in every frame, but the strings only change once per
//! refresh interval so they stay readable.

use overlay_metrics::FrameSample;

pub fn format_rate(frame_rate_hz: f64) -> String {
    format!("{frame_rate_hz:.2} fps")
}

pub fn format_time(frame_time_ms: f64) -> String {
    format!("{frame_time_ms:.2} ms")
}

#[derive(Debug, Clone)]
pub struct TextReporter {
    interval_ms: f64,
    last_refresh_ms: f64,
    rate_text: String,
    time_text: String,
}

impl TextReporter {
    pub const INITIAL_RATE_TEXT: &'static str = "00.00 fps";
    pub const INITIAL_TIME_TEXT: &'static str = "00.00 ms";

    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_refresh_ms: 0.0,
            rate_text: Self::INITIAL_RATE_TEXT.to_string(),
            time_text: Self::INITIAL_TIME_TEXT.to_string(),
        }
    }

    /// Rewrites both strings from `sample` if more than the interval has
    /// passed since the last refresh. Returns whether it did.
    pub fn maybe_refresh(&mut self, now_ms: f64, sample: FrameSample) -> bool {
        if now_ms - self.last_refresh_ms <= self.interval_ms {
            return false;
        }
        self.last_refresh_ms = now_ms;
        self.rate_text = format_rate(sample.frame_rate_hz);
        self.time_text = format_time(sample.frame_time_ms);
        true
    }

    pub fn rate_text(&self) -> &str {
        &self.rate_text
    }

    pub fn time_text(&self) -> &str {
        &self.time_text
    }
}
