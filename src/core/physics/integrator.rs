//=========================================================================
// Physics Integrator (threaded)
//=========================================================================
//
// Runs `PhysicsState` on a dedicated thread at a fixed tick rate.
//
// Architecture:
// ```text
//  any thread                       physics thread
//  ┌─────────────────┐   Mutex    ┌───────────────────────────────┐
//  │ set_input()     │──────────► │ 1. snapshot input + visible   │
//  │ set_visible()   │            │ 2. PhysicsState::tick()       │
//  │ offset() ◄──────│◄───────────│ 3. publish offset             │
//  └─────────────────┘            │ 4. TickPacer: sleep / overrun │
//                                 └───────────────────────────────┘
// ```
//
// The lock is held only to copy values in or out, never across the tick
// computation or the sleep. Shutdown is cooperative: `stop()` raises a
// flag that the loop checks once per tick, then joins the thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use glam::Vec2;
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::{PaceOutcome, PhysicsConfig, PhysicsState, TickPacer, TickReport};
use crate::core::diagnostics::{Diagnostic, DiagnosticSink};

//=== SharedState =========================================================

#[derive(Debug, Clone, Copy)]
struct SharedState {
    input: Vec2,
    offset: Vec2,
    visible: bool,
}

//=== PhysicsHandle =======================================================

/// Cloneable, thread-safe access to the integrator's shared state.
///
/// Every method takes the lock for a copy in or out only.
#[derive(Debug, Clone)]
pub struct PhysicsHandle {
    shared: Arc<Mutex<SharedState>>,
}

impl PhysicsHandle {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(SharedState {
                input: Vec2::ZERO,
                offset: Vec2::ZERO,
                visible: true,
            })),
        }
    }

    /// Overwrites the raw input. Only the latest value is kept.
    pub fn set_input(&self, x: f32, y: f32) {
        self.lock().input = Vec2::new(x, y);
    }

    pub fn set_visible(&self, visible: bool) {
        self.lock().visible = visible;
    }

    /// Snapshot of the most recently published camera offset.
    pub fn offset(&self) -> Vec2 {
        self.lock().offset
    }

    pub fn input(&self) -> Vec2 {
        self.lock().input
    }

    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    //--- Physics Thread Side ----------------------------------------------

    fn snapshot_input(&self) -> (Vec2, bool) {
        let shared = self.lock();
        (shared.input, shared.visible)
    }

    pub(crate) fn publish_offset(&self, offset: Vec2) {
        self.lock().offset = offset;
    }

    // The guarded data is plain values; a panic elsewhere cannot leave it
    // half-written, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PhysicsHandle {
    fn default() -> Self {
        Self::new()
    }
}

//=== PhysicsIntegrator ===================================================

/// Owns the physics thread.
///
/// # Lifecycle
///
/// 1. **Construction**: `PhysicsIntegrator::new(config, diagnostics)`
/// 2. **Start**: `start()` spawns the tick loop (no-op while running)
/// 3. **Input**: `set_input()` / `set_visible()` from any thread
/// 4. **Stop**: `stop()` raises the stop flag and joins; the loop exits
///    after finishing the in-flight tick, within one tick period
///
/// Dropping the integrator stops it.
pub struct PhysicsIntegrator {
    config: PhysicsConfig,
    handle: PhysicsHandle,
    diagnostics: DiagnosticSink,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl PhysicsIntegrator {
    //--- Construction -----------------------------------------------------

    pub fn new(config: PhysicsConfig, diagnostics: DiagnosticSink) -> Self {
        Self {
            config,
            handle: PhysicsHandle::new(),
            diagnostics,
            running: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    //--- Shared State -----------------------------------------------------

    pub fn set_input(&self, x: f32, y: f32) {
        self.handle.set_input(x, y);
    }

    pub fn set_visible(&self, visible: bool) {
        self.handle.set_visible(visible);
    }

    pub fn offset(&self) -> Vec2 {
        self.handle.offset()
    }

    /// A handle sharing this integrator's state, for other threads.
    pub fn handle(&self) -> PhysicsHandle {
        self.handle.clone()
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|thread| !thread.is_finished())
    }

    //--- Thread Control ---------------------------------------------------

    /// Spawns the tick loop.
    ///
    /// The loop resumes from the last published offset. Calling `start()`
    /// while the loop is already running does nothing.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn start(&mut self) -> io::Result<()> {
        if self.is_running() {
            debug!(target: "physics", "Physics thread already running");
            return Ok(());
        }
        // Reap a loop that exited on its own (e.g. after a panic).
        self.join();

        self.running.store(true, Ordering::Release);

        let handle = self.handle.clone();
        let running = Arc::clone(&self.running);
        let diagnostics = self.diagnostics.clone();
        let config = self.config;

        let spawned = thread::Builder::new()
            .name("parallax-physics".into())
            .spawn(move || run_tick_loop(config, handle, running, diagnostics));

        match spawned {
            Ok(thread) => {
                info!(
                    target: "physics",
                    "Physics thread started (tick: {:?}, decay: {})",
                    self.config.tick_period,
                    self.config.decay
                );
                self.thread = Some(thread);
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::Release);
                error!(target: "physics", "Failed to spawn physics thread: {}", e);
                Err(e)
            }
        }
    }

    /// Raises the stop flag without waiting for the thread.
    pub fn request_stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Stops the tick loop and waits for the thread to terminate.
    pub fn stop(&mut self) {
        self.request_stop();
        self.join();
    }

    fn join(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };

        match thread.join() {
            Ok(()) => info!(target: "physics", "Physics thread terminated cleanly"),
            Err(e) => error!(target: "physics", "Physics thread panicked: {:?}", e),
        }
    }
}

impl Drop for PhysicsIntegrator {
    fn drop(&mut self) {
        self.stop();
    }
}

//=== Tick Loop ===========================================================

fn run_tick_loop(
    config: PhysicsConfig,
    handle: PhysicsHandle,
    running: Arc<AtomicBool>,
    diagnostics: DiagnosticSink,
) {
    let pacer = TickPacer::new(config.tick_period);
    let mut state = PhysicsState::with_offset(&config, handle.offset());

    while running.load(Ordering::Acquire) {
        let tick_start = Instant::now();

        //--- Step 1: Snapshot shared input -------------------------------
        let (input, visible) = handle.snapshot_input();

        //--- Step 2: Advance and publish ---------------------------------
        if let TickReport::Advanced { offset, stale } = state.tick(input, visible) {
            handle.publish_offset(offset);

            if let Some(idle) = stale {
                warn!(
                    target: "physics",
                    "Gyroscope input unchanged for {:?} ({}, {}) while ticks continue",
                    idle,
                    input.x,
                    input.y
                );
                diagnostics.emit(Diagnostic::StaleInput { input, idle });
            }
        }

        //--- Step 3: Hold the tick budget --------------------------------
        if let PaceOutcome::Overrun(elapsed) = pacer.pace(tick_start) {
            warn!(
                target: "physics",
                "Tick overran its budget: took {:?} of {:?}, not sleeping",
                elapsed,
                pacer.budget()
            );
            diagnostics.emit(Diagnostic::TickOverrun {
                elapsed,
                budget: pacer.budget(),
            });
        }
    }

    debug!(target: "physics", "Physics loop exiting");
}

//=========================================================================
// Unit Tests
//=========================================================================
