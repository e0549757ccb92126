//=========================================================================
// Frame Loop
//=========================================================================
//
// Self-rescheduling frame callback.
//
// The host calls the engine once per display refresh; after each frame the
// engine answers whether it wants the next one. Posting and removing the
// callback mirror the display compositor's API, so the engine can stop
// drawing while hidden without the host tracking any state.
//
//=========================================================================

//=== FrameRequest ========================================================

/// Answer to the host after a frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    /// Schedule another frame at the next refresh.
    Next,

    /// Do not schedule; the engine will post again when it needs frames.
    Stop,
}

//=== FrameLoop ===========================================================

#[derive(Debug, Default)]
pub(crate) struct FrameLoop {
    posted: bool,
    frames: u64,
}

impl FrameLoop {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn post(&mut self) {
        self.posted = true;
    }

    pub(crate) fn remove(&mut self) {
        self.posted = false;
    }

    pub(crate) fn is_posted(&self) -> bool {
        self.posted
    }

    /// Consumes the pending callback. Returns `false` when none was posted.
    pub(crate) fn begin_frame(&mut self) -> bool {
        if !self.posted {
            return false;
        }
        self.frames = self.frames.wrapping_add(1);
        true
    }

    /// Re-registers for the next refresh, unless removed during the frame.
    pub(crate) fn end_frame(&self) -> FrameRequest {
        if self.posted {
            FrameRequest::Next
        } else {
            FrameRequest::Stop
        }
    }

    pub(crate) fn frame_count(&self) -> u64 {
        self.frames
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unposted_loop_skips_frames() {
        let mut frames = FrameLoop::new();
        assert!(!frames.begin_frame());
        assert_eq!(frames.frame_count(), 0);
        assert_eq!(frames.end_frame(), FrameRequest::Stop);
    }

    #[test]
    fn posted_loop_reschedules_itself() {
        let mut frames = FrameLoop::new();
        frames.post();

        for _ in 0..3 {
            assert!(frames.begin_frame());
            assert_eq!(frames.end_frame(), FrameRequest::Next);
        }
        assert_eq!(frames.frame_count(), 3);
    }

    #[test]
    fn removal_stops_rescheduling() {
        let mut frames = FrameLoop::new();
        frames.post();
        assert!(frames.begin_frame());

        frames.remove();

        assert_eq!(frames.end_frame(), FrameRequest::Stop);
        assert!(!frames.is_posted());
    }
}
