//! Time utilities of update passes.

use std::time::Duration;

/// Type which represents duration between two ticks of the same pass.
pub type DeltaTime = Duration;

/// One execution of an update pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tick {
    /// Timestamp of the frame which started this tick, in nanoseconds.
    pub time_nanos: u64,
    /// Time elapsed since the previous tick of the same pass.
    pub delta: DeltaTime,
}

impl Tick {
    /// Creates new tick.
    pub const fn new(time_nanos: u64, delta: DeltaTime) -> Self {
        Self { time_nanos, delta }
    }

    /// Elapsed time in seconds.
    pub fn delta_secs(&self) -> f64 {
        self.delta.as_secs_f64()
    }

    /// Elapsed time in nanoseconds.
    pub fn delta_nanos(&self) -> u64 {
        self.delta.as_nanos() as u64
    }
}
