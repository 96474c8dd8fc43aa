//! Profiling of update passes.

use std::collections::VecDeque;

use cadence_ecs::DeltaTime;

use crate::app::Pass;
use crate::config::DEFAULT_PROFILE_WINDOW;

const NANOS_PER_SEC: f64 = 1e9;

/// Rolling window of the last deltas of each pass.
#[derive(Debug, Clone)]
pub struct Performance {
    window: usize,
    samples: [VecDeque<DeltaTime>; Pass::COUNT],
}

impl Performance {
    /// Creates profiler which keeps at most `window` samples for each pass.
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            samples: [VecDeque::with_capacity(window), VecDeque::with_capacity(window)],
        }
    }

    /// Records delta of the tick of the pass, evicting the oldest sample if window is full.
    pub fn record(&mut self, pass: Pass, delta: DeltaTime) {
        let samples = &mut self.samples[pass.index()];
        if samples.len() == self.window {
            samples.pop_back();
        }
        samples.push_front(delta);
    }

    /// Average count of ticks per second of the pass.
    ///
    /// Returns `None` if there are no samples yet or all of them are zero.
    ///
    pub fn rate(&self, pass: Pass) -> Option<f64> {
        let samples = &self.samples[pass.index()];
        if samples.is_empty() {
            return None;
        }
        let total: DeltaTime = samples.iter().sum();
        let mean = total.as_nanos() as f64 / samples.len() as f64;
        if mean == 0.0 {
            return None;
        }
        Some(NANOS_PER_SEC / mean)
    }

    /// Count of samples recorded for the pass.
    pub fn samples(&self, pass: Pass) -> usize {
        self.samples[pass.index()].len()
    }

    /// Maximal count of samples kept for each pass.
    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for Performance {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILE_WINDOW)
    }
}
