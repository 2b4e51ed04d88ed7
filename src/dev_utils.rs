// src/dev_utils.rs

use crate::constants::TIMING_TARGET;
use std::time::Instant;

/// A simple RAII timer for profiling a phase of the dispatch pipeline.
/// When created, it records the start time. When it goes out of scope (is dropped),
/// it logs the elapsed time at `debug` level under the timing target.
#[derive(Debug)]
pub struct Stopwatch {
    name: &'static str,
    start: Instant,
}

impl Stopwatch {
    /// Creates a new timer and starts it immediately.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        log::debug!(
            target: TIMING_TARGET,
            "{} -> {} µs",
            self.name,
            self.start.elapsed().as_micros()
        );
    }
}
