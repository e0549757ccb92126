//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Types the platform glue uses to feed the core.
//
// Defines the contract for sensor delivery: how a raw gyroscope reading
// maps onto the 2-axis input, and the cross-thread sink it is pushed into.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::physics::PhysicsHandle;

//=== SensorSample ========================================================

/// One angular-rate reading reduced to the two axes the camera uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    pub x: f32,
    pub y: f32,
}

impl SensorSample {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Maps a gyroscope reading `[about_x, about_y, about_z]` (rad/s).
    ///
    /// Turning the device about its vertical (Y) axis pans the camera
    /// horizontally; tilting it about X pans vertically. Z is ignored.
    pub const fn from_gyroscope(values: [f32; 3]) -> Self {
        Self::new(values[1], values[0])
    }
}

//=== SampleSink ==========================================================

/// Cloneable entry point for the sensor-delivery context.
///
/// Samples are written straight into the integrator's raw input (latest
/// value wins, nothing is queued). While the engine's sensor subscription
/// is inactive, samples are dropped.
#[derive(Debug, Clone)]
pub struct SampleSink {
    physics: PhysicsHandle,
    subscribed: Arc<AtomicBool>,
}

impl SampleSink {
    pub(crate) fn new(physics: PhysicsHandle, subscribed: Arc<AtomicBool>) -> Self {
        Self { physics, subscribed }
    }

    /// Delivers one sample. Returns `false` when it was dropped.
    pub fn deliver(&self, sample: SensorSample) -> bool {
        if !self.is_subscribed() {
            trace!(target: "platform::input", "Sensor unsubscribed, dropping {:?}", sample);
            return false;
        }

        self.physics.set_input(sample.x, sample.y);
        true
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::Acquire)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::thread;

    fn sink(subscribed: bool) -> (SampleSink, PhysicsHandle) {
        let physics = PhysicsHandle::new();
        let sink = SampleSink::new(physics.clone(), Arc::new(AtomicBool::new(subscribed)));
        (sink, physics)
    }

    #[test]
    fn gyroscope_axes_are_swapped() {
        let sample = SensorSample::from_gyroscope([0.1, 0.2, 0.3]);
        assert_eq!(sample, SensorSample::new(0.2, 0.1));
    }

    #[test]
    fn subscribed_sink_overwrites_input() {
        let (sink, physics) = sink(true);

        assert!(sink.deliver(SensorSample::new(1.0, 2.0)));
        assert!(sink.deliver(SensorSample::new(3.0, 4.0)));

        assert_eq!(physics.input(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn unsubscribed_sink_drops_samples() {
        let (sink, physics) = sink(false);

        assert!(!sink.deliver(SensorSample::new(1.0, 2.0)));
        assert_eq!(physics.input(), Vec2::ZERO);
    }

    #[test]
    fn sink_delivers_from_another_thread() {
        let (sink, physics) = sink(true);
        let remote = sink.clone();

        thread::spawn(move || remote.deliver(SensorSample::new(5.0, 6.0)))
            .join()
            .unwrap();

        assert_eq!(physics.input(), Vec2::new(5.0, 6.0));
    }
}
