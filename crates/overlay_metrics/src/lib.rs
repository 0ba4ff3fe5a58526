//! Overlay Metrics - frame timing primitives for the debug overlay
//!
//! Provides the measurement side of the overlay:
//! - [`RingBuffer`]: fixed-capacity FIFO window of recent samples
//! - [`FrameTimer`]: per-call elapsed time and the derived frame rate
//! - [`Clock`]: the millisecond timing source the host provides
//!
//! # Usage
//!
//! ```
//! use overlay_metrics::{Clock, FrameTimer, ManualClock};
//!
//! let clock = ManualClock::new();
//! let mut timer = FrameTimer::new();
//!
//! timer.tick(clock.now_ms()); // seeds the timestamp
//! clock.advance(20.0);
//! let sample = timer.tick(clock.now_ms());
//! assert_eq!(sample.frame_rate_hz, 50.0);
//! ```

mod clock;
mod frame_timer;
mod ring_buffer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use frame_timer::{FrameSample, FrameTimer};
pub use ring_buffer::RingBuffer;
