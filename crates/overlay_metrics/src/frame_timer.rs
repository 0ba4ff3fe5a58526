//! Frame timing utilities

/// Metrics derived from the last two observed timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameSample {
    pub frame_time_ms: f64,
    pub frame_rate_hz: f64,
}

/// Measures the time between consecutive [`FrameTimer::tick`] calls.
///
/// The first tick only seeds the timestamp; both metrics stay at zero
/// until a second tick arrives.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last_time: Option<f64>,
    current: FrameSample,
    measured: bool,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `now_ms` and returns the updated metrics.
    ///
    /// A zero or negative gap records a frame time of zero and keeps the
    /// previous frame rate.
    pub fn tick(&mut self, now_ms: f64) -> FrameSample {
        if let Some(last) = self.last_time {
            let elapsed = (now_ms - last).max(0.0);
            self.measured = true;
            self.current.frame_time_ms = elapsed;
            if elapsed > 0.0 {
                self.current.frame_rate_hz = 1000.0 / elapsed;
            } else {
                tracing::trace!(now_ms, last, "non-positive frame gap, keeping previous rate");
            }
        }
        self.last_time = Some(now_ms);
        self.current
    }

    pub fn sample(&self) -> FrameSample {
        self.current
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.current.frame_time_ms
    }

    pub fn fps(&self) -> f64 {
        self.current.frame_rate_hz
    }

    /// True once two ticks have been observed.
    pub fn has_measurement(&self) -> bool {
        self.measured
    }
}
