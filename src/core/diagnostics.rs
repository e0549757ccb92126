//=========================================================================
// Diagnostics
//=========================================================================
//
// Typed diagnostic signals raised by the physics loop and the compositor.
//
// None of these conditions are errors: the loops keep running. Each one is
// logged at the source and, when a subscriber was registered, also pushed
// onto a bounded channel so hosts and tests can observe it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::{Sender, TrySendError};
use glam::Vec2;
use log::trace;

//=== Diagnostic ==========================================================

/// Non-fatal condition observed by a core system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Diagnostic {
    /// Raw input stayed identical (and non-zero) for longer than the stale
    /// threshold while ticks kept running.
    StaleInput { input: Vec2, idle: Duration },

    /// A physics tick used up its whole time budget; no sleep happened.
    TickOverrun { elapsed: Duration, budget: Duration },

    /// A frame was requested before the surface geometry was known.
    GeometryUnset,
}

//=== DiagnosticSink ======================================================

/// Optional, non-blocking publisher for [`Diagnostic`] signals.
///
/// A full or disconnected channel never stalls the emitting loop; the
/// signal is dropped instead.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    sender: Option<Sender<Diagnostic>>,
}

impl DiagnosticSink {
    pub fn new(sender: Sender<Diagnostic>) -> Self {
        Self { sender: Some(sender) }
    }

    /// Sink that only relies on logging.
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn emit(&self, diagnostic: Diagnostic) {
        let Some(sender) = &self.sender else {
            return;
        };

        match sender.try_send(diagnostic) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                trace!(target: "diagnostics", "Channel full, dropping {:?}", dropped);
            }
            Err(TrySendError::Disconnected(dropped)) => {
                trace!(target: "diagnostics", "No subscriber, dropping {:?}", dropped);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
