//=========================================================================
// Gyro Emulator
//=========================================================================
//
// Turns cursor motion into angular-rate samples for the desktop preview.
//
// Architecture:
//   CursorMoved ─► accumulate delta ─► RedrawRequested ─► take_sample()
//
// A real gyroscope reports ~0 when the device is still, so a frame without
// cursor motion yields a zero sample instead of repeating the last one.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::SensorSample;

//=== GyroEmulator ========================================================

/// Accumulates cursor deltas between frame boundaries.
pub(crate) struct GyroEmulator {
    last_position: Option<(f64, f64)>,
    pending: (f64, f64),
    sensitivity: f32,
}

impl GyroEmulator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(sensitivity: f32) -> Self {
        Self {
            last_position: None,
            pending: (0.0, 0.0),
            sensitivity,
        }
    }

    //--- Event Processing -------------------------------------------------

    /// Adds the motion since the previous cursor position.
    pub(crate) fn on_cursor_moved(&mut self, x: f64, y: f64) {
        if let Some((last_x, last_y)) = self.last_position {
            self.pending.0 += x - last_x;
            self.pending.1 += y - last_y;
        }
        self.last_position = Some((x, y));
    }

    /// Cursor left the window; the next entry must not count as a jump.
    pub(crate) fn on_cursor_left(&mut self) {
        self.last_position = None;
    }

    //--- Frame Boundary ---------------------------------------------------

    /// Returns the motion of the last frame as a sample and starts over.
    pub(crate) fn take_sample(&mut self) -> SensorSample {
        let (dx, dy) = std::mem::take(&mut self.pending);
        SensorSample::new(dx as f32 * self.sensitivity, dy as f32 * self.sensitivity)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_position_is_only_a_reference() {
        let mut gyro = GyroEmulator::new(1.0);
        gyro.on_cursor_moved(100.0, 100.0);
        assert_eq!(gyro.take_sample(), SensorSample::new(0.0, 0.0));
    }

    #[test]
    fn motion_accumulates_until_taken() {
        let mut gyro = GyroEmulator::new(0.5);
        gyro.on_cursor_moved(0.0, 0.0);
        gyro.on_cursor_moved(4.0, -2.0);
        gyro.on_cursor_moved(10.0, -6.0);

        assert_eq!(gyro.take_sample(), SensorSample::new(5.0, -3.0));
    }

    #[test]
    fn still_frame_yields_zero_sample() {
        let mut gyro = GyroEmulator::new(1.0);
        gyro.on_cursor_moved(0.0, 0.0);
        gyro.on_cursor_moved(3.0, 3.0);
        gyro.take_sample();

        assert_eq!(gyro.take_sample(), SensorSample::new(0.0, 0.0));
    }

    #[test]
    fn reentry_after_leaving_is_not_a_jump() {
        let mut gyro = GyroEmulator::new(1.0);
        gyro.on_cursor_moved(0.0, 0.0);
        gyro.on_cursor_left();
        gyro.on_cursor_moved(500.0, 500.0);

        assert_eq!(gyro.take_sample(), SensorSample::new(0.0, 0.0));
    }
}
