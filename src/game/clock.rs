//! Game clock: elapsed time is always `now - start`, never an accumulated
//! per-frame delta, so frame-rate variance cannot drift the schedule.

/// Records the instant (performance.now() ms) a session started.
#[derive(Clone, Copy, Debug)]
pub struct GameClock {
    start_ms: f64,
}

impl GameClock {
    pub fn started_at(now_ms: f64) -> Self {
        Self { start_ms: now_ms }
    }

    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.start_ms
    }
}

/// Outcome of one tick: whether the driver should schedule another frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Running,
    Finished,
}
