//=========================================================================
// Physics State
//=========================================================================
//
// Pure per-tick step of the integrator. Owned by the physics thread; the
// thread publishes the resulting offset through `PhysicsHandle`.
//
// Frame lifecycle (one tick):
//   invisible ─► nothing changes
//   visible   ─► offset *= decay ─► offset += input ─► staleness check
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::{PhysicsConfig, StalenessTracker};

//=== TickReport ==========================================================

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickReport {
    /// Wallpaper hidden; offset frozen.
    Skipped,

    /// Offset advanced. `stale` carries the exceeded idle time when the
    /// input was reported as stale on this tick.
    Advanced { offset: Vec2, stale: Option<Duration> },
}

//=== PhysicsState ========================================================

/// Camera offset plus the staleness tracker.
#[derive(Debug, Clone)]
pub struct PhysicsState {
    offset: Vec2,
    decay: f32,
    staleness: StalenessTracker,
}

impl PhysicsState {
    pub fn new(config: &PhysicsConfig) -> Self {
        Self::with_offset(config, Vec2::ZERO)
    }

    /// Resumes from a previously published offset.
    pub fn with_offset(config: &PhysicsConfig, offset: Vec2) -> Self {
        Self {
            offset,
            decay: config.decay,
            staleness: StalenessTracker::new(config.tick_period, config.stale_threshold),
        }
    }

    /// Advances the state by one tick.
    pub fn tick(&mut self, input: Vec2, visible: bool) -> TickReport {
        if !visible {
            return TickReport::Skipped;
        }

        self.offset *= self.decay;
        self.offset += input;

        TickReport::Advanced {
            offset: self.offset,
            stale: self.staleness.observe(input),
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
