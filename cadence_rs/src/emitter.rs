//! Periodic spawning of entities.

use std::time::Duration;

/// Default time between two emissions.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

/// Counts elapsed time and tells when the next entity should be emitted.
#[derive(Debug, Clone)]
pub struct Emitter {
    interval_nanos: u64,
    limit: Option<u64>,
    emitted: u64,
    elapsed_nanos: u64,
}

impl Emitter {
    /// Creates emitter which emits every `interval`, at most `limit` times if set.
    pub fn new(interval: Duration, limit: Option<u64>) -> Self {
        Self {
            interval_nanos: interval.as_nanos() as u64,
            limit,
            emitted: 0,
            elapsed_nanos: 0,
        }
    }

    /// Accumulates `delta_nanos` and returns `true` when an entity should be emitted.
    ///
    /// Accumulated time is reset after each emission.
    ///
    pub fn update(&mut self, delta_nanos: u64) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.elapsed_nanos += delta_nanos;
        if self.elapsed_nanos <= self.interval_nanos {
            return false;
        }
        self.elapsed_nanos = 0;
        self.emitted += 1;
        true
    }

    /// Count of emissions so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.limit, Some(limit) if self.emitted >= limit)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL, None)
    }
}
