/// Fixed-cadence frame timing.
///
/// Each frame sleeps for `interval - elapsed`. A frame that overruns the
/// interval gets a zero sleep, so the next one starts immediately; the
/// overrun is not paid back later.

use std::time::{Duration, Instant};

pub const DEFAULT_FPS: u32 = 30;

#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    interval: Duration,
}

impl FrameClock {
    /// `fps` of zero is treated as 1.
    pub fn new(fps: u32) -> Self {
        let fps = fps.max(1);
        FrameClock { interval: Duration::from_secs(1) / fps }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// How long to wait after a frame that took `elapsed`.
    pub fn delay_after(&self, elapsed: Duration) -> Duration {
        self.interval.saturating_sub(elapsed)
    }

    /// Convenience for the game loop: delay after a frame begun at `start`.
    pub fn delay_since(&self, start: Instant) -> Duration {
        self.delay_after(start.elapsed())
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        FrameClock::new(DEFAULT_FPS)
    }
}
