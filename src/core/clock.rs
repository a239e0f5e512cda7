use std::time::Instant;

use crate::math::Real;

/// Measures wall-clock time between frames for `Scene::tick`
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    /// Creates a clock that has not ticked yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds elapsed since the previous call.
    ///
    /// The first call returns `0.0` so the first frame does not take a
    /// step of arbitrary length.
    pub fn tick(&mut self) -> Real {
        self.tick_at(Instant::now())
    }

    /// Like `tick`, with the current instant supplied by the caller
    pub fn tick_at(&mut self, now: Instant) -> Real {
        let elapsed = self
            .last
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f64());
        self.last = Some(now);
        elapsed
    }

    /// Forgets the previous frame; the next tick returns `0.0` again
    pub fn reset(&mut self) {
        self.last = None;
    }
}
