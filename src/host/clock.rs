use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::foundation::core::Fps;

/// Monotonic time source the host paces against.
pub trait Clock {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;
    /// Block for `d`.
    fn sleep(&self, d: Duration);
}

/// Wall clock.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Deterministic clock: time moves only through `advance` and `sleep`.
///
/// Clones share the same time, so a test can keep a handle while the host owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
    slept: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate work taking `d`.
    pub fn advance(&self, d: Duration) {
        self.now.set(self.now.get() + d);
    }

    /// Total time spent in `sleep`.
    pub fn total_slept(&self) -> Duration {
        self.slept.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, d: Duration) {
        self.slept.set(self.slept.get() + d);
        self.advance(d);
    }
}

/// Holds the display to a target frame period and tracks a smoothed frame rate.
#[derive(Clone, Debug)]
pub struct FramePacer {
    period: Duration,
    last_frame_at: Option<Duration>,
    avg_fps: f64,
}

impl FramePacer {
    /// Pacer targeting `fps`.
    pub fn new(fps: Fps) -> Self {
        Self {
            period: fps.frame_period(),
            last_frame_at: None,
            avg_fps: fps.as_f64(),
        }
    }

    /// Target frame period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// When the previous frame was released, if any.
    pub fn last_frame_at(&self) -> Option<Duration> {
        self.last_frame_at
    }

    /// Exponentially smoothed frames per second.
    pub fn average_fps(&self) -> f64 {
        self.avg_fps
    }

    /// Time since the previous frame was released, without pacing.
    pub fn elapsed(&self, clock: &dyn Clock) -> Option<Duration> {
        self.last_frame_at
            .map(|last| clock.now().saturating_sub(last))
    }

    /// Sleep off the rest of the frame period and mark a frame released.
    ///
    /// Returns the interval since the previous release; zero on the first call.
    pub fn pace(&mut self, clock: &dyn Clock) -> Duration {
        let now = clock.now();
        let Some(last) = self.last_frame_at else {
            self.last_frame_at = Some(now);
            return Duration::ZERO;
        };
        let elapsed = now.saturating_sub(last);
        if !elapsed.is_zero() {
            self.avg_fps = 0.9 * self.avg_fps + 0.1 * (1.0 / elapsed.as_secs_f64());
        }
        debug!(fps = self.avg_fps, "frame paced");
        if elapsed < self.period {
            clock.sleep(self.period - elapsed);
        }
        let released = clock.now();
        self.last_frame_at = Some(released);
        released.saturating_sub(last)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/clock.rs"]
mod tests;
