//=========================================================================
// Physics Integrator
//
// Turns noisy, irregularly delivered angular-rate samples into a smooth
// camera offset, advanced at a fixed tick rate on a dedicated thread.
//
// Responsibilities:
// - Hold the latest raw input, the camera offset and the visibility flag
//   behind one short-held lock (`PhysicsHandle`)
// - Advance the offset each tick: `offset = offset * decay + input`
// - Detect input that stopped changing while ticks continue
// - Pace the loop to the tick budget and report overruns
//
// Notes:
// The decay and the input accumulation are applied per tick, not scaled
// by elapsed time. Changing the tick period changes the perceived motion.
//
//=========================================================================

//=== Module Declarations =================================================

mod integrator;
mod pacer;
mod staleness;
mod state;

//=== Public API ==========================================================

pub use integrator::{PhysicsHandle, PhysicsIntegrator};
pub use pacer::{PaceOutcome, TickPacer};
pub use staleness::StalenessTracker;
pub use state::{PhysicsState, TickReport};

//=== External Dependencies ===============================================

use std::time::Duration;

//=== PhysicsConfig =======================================================

/// Tunables of the physics loop.
///
/// # Default Values
///
/// - **tick_period**: 5 ms
/// - **decay**: 0.97 per tick
/// - **stale_threshold**: 1 s of identical non-zero input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    /// Target wall-time of one tick. Also the idle-time increment of the
    /// staleness tracker.
    pub tick_period: Duration,

    /// Multiplicative damping applied to the offset every tick.
    pub decay: f32,

    /// Idle time after which unchanged input is reported as stale.
    pub stale_threshold: Duration,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(5),
            decay: 0.97,
            stale_threshold: Duration::from_secs(1),
        }
    }
}
