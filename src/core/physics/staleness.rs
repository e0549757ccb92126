//=========================================================================
// Staleness Tracker
//=========================================================================
//
// Detects a gyroscope that keeps delivering the exact same non-zero value.
//
// Architecture:
//   observe(input) ─► same as baseline && non-zero? ─► idle += step
//                                                     idle > threshold?
//                                                       ─► stale, idle = 0
//                  └► otherwise ─► baseline = input, idle = 0
//
// Idle time is accumulated as `Duration` so the crossing tick is exact:
// with a 5 ms step and a 1 s threshold the signal fires on the 201st
// identical tick after the baseline was recorded.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;

//=== StalenessTracker ====================================================

/// Tracks how long the raw input has stayed unchanged.
#[derive(Debug, Clone)]
pub struct StalenessTracker {
    baseline: Vec2,
    idle: Duration,
    step: Duration,
    threshold: Duration,
}

impl StalenessTracker {
    /// Creates a tracker that adds `step` of idle time per unchanged
    /// observation and fires once idle time exceeds `threshold`.
    pub fn new(step: Duration, threshold: Duration) -> Self {
        Self {
            baseline: Vec2::ZERO,
            idle: Duration::ZERO,
            step,
            threshold,
        }
    }

    /// Records one tick's input.
    ///
    /// Returns the idle time that was exceeded when the input is reported
    /// as stale, `None` otherwise. After a report the idle time restarts
    /// from zero, so a held input fires once per threshold window.
    pub fn observe(&mut self, input: Vec2) -> Option<Duration> {
        if input == self.baseline && input != Vec2::ZERO {
            self.idle += self.step;
            if self.idle > self.threshold {
                let idle = self.idle;
                self.idle = Duration::ZERO;
                return Some(idle);
            }
        } else {
            self.baseline = input;
            self.idle = Duration::ZERO;
        }
        None
    }

    /// Idle time accumulated since the input last changed.
    pub fn idle(&self) -> Duration {
        self.idle
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
