//=========================================================================
// Tick Pacer
//=========================================================================
//
// Keeps the physics loop on its fixed budget: measure the tick, sleep the
// remainder, report an overrun instead of sleeping when the budget is
// already spent. Uses the monotonic clock (`Instant`).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

//=== PaceOutcome =========================================================

/// Result of pacing one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaceOutcome {
    /// The tick finished early; the thread slept for the remainder.
    Slept(Duration),

    /// The tick took at least the whole budget; no sleep happened.
    Overrun(Duration),
}

//=== TickPacer ===========================================================

#[derive(Debug, Clone, Copy)]
pub struct TickPacer {
    budget: Duration,
}

impl TickPacer {
    /// # Panics
    ///
    /// Panics if `budget` is zero.
    pub fn new(budget: Duration) -> Self {
        assert!(!budget.is_zero(), "Tick budget must be positive");
        Self { budget }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Decides how long to sleep after a tick that took `elapsed`.
    pub fn plan(&self, elapsed: Duration) -> PaceOutcome {
        match self.budget.checked_sub(elapsed) {
            Some(remaining) if !remaining.is_zero() => PaceOutcome::Slept(remaining),
            _ => PaceOutcome::Overrun(elapsed),
        }
    }

    /// Sleeps out the rest of the budget of a tick that began at `tick_start`.
    pub fn pace(&self, tick_start: Instant) -> PaceOutcome {
        let outcome = self.plan(tick_start.elapsed());
        if let PaceOutcome::Slept(remaining) = outcome {
            thread::sleep(remaining);
        }
        outcome
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
