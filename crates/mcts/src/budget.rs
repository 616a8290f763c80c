//! Per-decision search budget.

use std::time::{Duration, Instant};

/// Wall-clock deadline plus an optional iteration cap.
///
/// Checked between iterations only; an iteration in progress always completes.
#[derive(Clone, Copy, Debug)]
pub struct Budget {
    started: Instant,
    limit: Duration,
    max_iterations: Option<usize>,
}

impl Budget {
    /// Start the clock now.
    pub fn start(limit: Duration, max_iterations: Option<usize>) -> Self {
        Self {
            started: Instant::now(),
            limit,
            max_iterations,
        }
    }

    /// True once the deadline passed or `iterations` reached the cap.
    pub fn exhausted(&self, iterations: usize) -> bool {
        if self.max_iterations.is_some_and(|max| iterations >= max) {
            return true;
        }
        self.started.elapsed() >= self.limit
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
