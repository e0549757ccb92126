//=========================================================================
// Wallpaper Engine
//
// Facade the platform glue talks to. Owns the physics integrator and the
// frame compositor and maps wallpaper lifecycle callbacks onto them.
//
// Architecture:
// ```text
//     WallpaperEngineBuilder ──build()──> WallpaperEngine
//         │                                  │
//         ├─ with_tick_period()              ├─ physics thread (fixed tick)
//         ├─ with_decay()                    ├─ compositor (per refresh)
//         ├─ with_overscan()                 └─ frame loop (self-rescheduling)
//         └─ with_diagnostics()
//
//  Host callbacks:
//    deliver_sample ─────────► raw input          (sensor context)
//    on_visibility_changed ──► visible flag, sensor, frame loop
//    on_surface_created/changed ► geometry + immediate redraw
//    on_surface_destroyed ───► frame loop removed, sensor off
//    on_frame ───────────────► render, then FrameRequest::Next/Stop
//    on_engine_destroyed ────► physics stopped and joined
// ```
//
//=========================================================================

//=== Submodules ==========================================================

mod frame_loop;

pub use frame_loop::FrameRequest;

//=== External Dependencies ===============================================

use std::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use glam::Vec2;
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::compositor::{
    CompositorConfig, FrameCompositor, FrameOutcome, LayerImage, RenderSurface,
};
use crate::core::diagnostics::{Diagnostic, DiagnosticSink};
use crate::core::physics::{PhysicsConfig, PhysicsIntegrator};
use crate::core::platform_bridge::{SampleSink, SensorSample};
use crate::platform::{Platform, PlatformError, PreviewConfig};
use frame_loop::FrameLoop;

//=== EngineError =========================================================

/// Engine construction and lifecycle errors.
#[derive(Debug)]
pub enum EngineError {
    /// The physics thread could not be spawned.
    ThreadSpawn(io::Error),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreadSpawn(e) => write!(f, "Failed to spawn physics thread: {}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ThreadSpawn(e) => Some(e),
        }
    }
}

//=== WallpaperEngineBuilder ==============================================

/// Builder for configuring and constructing a [`WallpaperEngine`].
///
/// # Default Values
///
/// - **Tick period**: 5 ms
/// - **Decay**: 0.97 per tick
/// - **Stale threshold**: 1 s
/// - **Overscan**: 1.4
/// - **Motion scale**: -1.4
/// - **Diagnostics**: logging only
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use parallax_wallpaper::WallpaperEngineBuilder;
/// use parallax_wallpaper::core::compositor::LayerImage;
///
/// let (tx, rx) = crossbeam_channel::bounded(64);
///
/// let engine = WallpaperEngineBuilder::new(
///     LayerImage::solid(1080, 2400, [20, 20, 40, 255]),
///     LayerImage::solid(1080, 2400, [0, 0, 0, 0]),
/// )
/// .with_tick_period(Duration::from_millis(5))
/// .with_diagnostics(tx)
/// .build()
/// .expect("physics thread");
/// # drop((engine, rx));
/// ```
pub struct WallpaperEngineBuilder {
    background: LayerImage,
    foreground: LayerImage,
    physics: PhysicsConfig,
    compositor: CompositorConfig,
    diagnostics: DiagnosticSink,
}

impl WallpaperEngineBuilder {
    /// Creates a builder with default settings for the two layers.
    pub fn new(background: LayerImage, foreground: LayerImage) -> Self {
        Self {
            background,
            foreground,
            physics: PhysicsConfig::default(),
            compositor: CompositorConfig::default(),
            diagnostics: DiagnosticSink::disabled(),
        }
    }

    /// Sets the fixed physics tick period.
    ///
    /// Decay and input accumulation are applied per tick, so this also
    /// changes how fast the camera responds.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        assert!(!period.is_zero(), "Tick period must be positive");
        self.physics.tick_period = period;
        self
    }

    /// Sets the per-tick multiplicative damping of the camera offset.
    ///
    /// # Panics
    ///
    /// Panics unless `0.0 <= decay < 1.0`.
    pub fn with_decay(mut self, decay: f32) -> Self {
        assert!((0.0..1.0).contains(&decay), "Decay must be in [0, 1), got {}", decay);
        self.physics.decay = decay;
        self
    }

    /// Sets how long identical non-zero input may last before it is
    /// reported as stale.
    ///
    /// # Panics
    ///
    /// Panics if `threshold` is zero.
    pub fn with_stale_threshold(mut self, threshold: Duration) -> Self {
        assert!(!threshold.is_zero(), "Stale threshold must be positive");
        self.physics.stale_threshold = threshold;
        self
    }

    /// Sets the layer overscan factor.
    ///
    /// # Panics
    ///
    /// Panics if `overscan` is not a positive finite number.
    pub fn with_overscan(mut self, overscan: f32) -> Self {
        assert!(
            overscan.is_finite() && overscan > 0.0,
            "Overscan must be positive, got {}",
            overscan
        );
        self.compositor.overscan = overscan;
        self
    }

    /// Sets the camera-to-pixel motion factor (negative moves layers
    /// against the tilt).
    ///
    /// # Panics
    ///
    /// Panics if `scale` is not finite.
    pub fn with_motion_scale(mut self, scale: f32) -> Self {
        assert!(scale.is_finite(), "Motion scale must be finite");
        self.compositor.motion_scale = scale;
        self
    }

    pub fn with_clear_color(mut self, rgba: [u8; 4]) -> Self {
        self.compositor.clear_color = rgba;
        self
    }

    /// Publishes [`Diagnostic`] signals on `sender` in addition to logging.
    pub fn with_diagnostics(mut self, sender: Sender<Diagnostic>) -> Self {
        self.diagnostics = DiagnosticSink::new(sender);
        self
    }

    /// Builds the engine and starts its physics thread.
    ///
    /// The sensor subscription starts active and the frame callback starts
    /// posted, so the first `on_frame` draws.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ThreadSpawn`] if the physics thread cannot be
    /// spawned.
    pub fn build(self) -> Result<WallpaperEngine, EngineError> {
        info!(
            target: "engine",
            "Creating wallpaper engine (background: {}x{}, foreground: {}x{})",
            self.background.width(),
            self.background.height(),
            self.foreground.width(),
            self.foreground.height()
        );

        let mut physics = PhysicsIntegrator::new(self.physics, self.diagnostics.clone());
        let compositor = FrameCompositor::new(
            self.background,
            self.foreground,
            physics.handle(),
            self.compositor,
            self.diagnostics,
        );

        physics.start().map_err(EngineError::ThreadSpawn)?;

        let mut frames = FrameLoop::new();
        frames.post();

        Ok(WallpaperEngine {
            physics,
            compositor,
            frames,
            sensor_subscribed: Arc::new(AtomicBool::new(true)),
            destroyed: false,
        })
    }
}

//=== WallpaperEngine =====================================================

/// One live-wallpaper instance.
///
/// # Lifecycle
///
/// 1. **Construction**: [`WallpaperEngineBuilder::build`] - physics running,
///    sensor subscribed, frame callback posted
/// 2. **Surface**: `on_surface_created` / `on_surface_changed`
/// 3. **Frames**: `on_frame` once per display refresh while it answers
///    [`FrameRequest::Next`]
/// 4. **Visibility**: `on_visibility_changed` pauses/resumes sensor and frames
/// 5. **Teardown**: `on_surface_destroyed`, then `on_engine_destroyed`
///    (also run on drop)
pub struct WallpaperEngine {
    physics: PhysicsIntegrator,
    compositor: FrameCompositor,
    frames: FrameLoop,
    sensor_subscribed: Arc<AtomicBool>,
    destroyed: bool,
}

impl WallpaperEngine {
    //--- Sensor Input -----------------------------------------------------

    /// Sink for the sensor-delivery context; may be moved to another thread.
    pub fn sample_sink(&self) -> SampleSink {
        SampleSink::new(self.physics.handle(), Arc::clone(&self.sensor_subscribed))
    }

    /// Stores the latest angular-rate sample. Returns `false` when the
    /// sensor subscription is inactive and the sample was dropped.
    pub fn deliver_sample(&self, x: f32, y: f32) -> bool {
        self.sample_sink().deliver(SensorSample::new(x, y))
    }

    //--- Lifecycle --------------------------------------------------------

    /// Shows or hides the wallpaper.
    ///
    /// Hidden: physics keeps ticking with a frozen offset, the sensor is
    /// unsubscribed and no frames are requested. Shown: the sensor is
    /// subscribed again, physics is restarted if it is not running, and the
    /// frame callback is posted.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ThreadSpawn`] if physics had to be restarted
    /// and the thread could not be spawned.
    pub fn on_visibility_changed(&mut self, visible: bool) -> Result<(), EngineError> {
        info!(target: "engine", "Visibility changed to {}", visible);
        self.physics.set_visible(visible);

        if visible {
            if self.destroyed {
                debug!(target: "engine", "Ignoring visibility on destroyed engine");
                return Ok(());
            }
            self.set_sensor_subscribed(true);
            self.physics.start().map_err(EngineError::ThreadSpawn)?;
            self.frames.post();
        } else {
            self.set_sensor_subscribed(false);
            self.frames.remove();
        }
        Ok(())
    }

    /// Surface became available; records its size and draws immediately.
    pub fn on_surface_created<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        width: u32,
        height: u32,
    ) -> Result<FrameOutcome, S::Error> {
        info!(target: "engine", "Surface created ({}x{})", width, height);
        self.compositor.on_geometry_changed(surface, width, height)
    }

    /// Surface was resized; records its size and draws immediately.
    pub fn on_surface_changed<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        width: u32,
        height: u32,
    ) -> Result<FrameOutcome, S::Error> {
        info!(target: "engine", "Surface set to {}x{}", width, height);
        self.compositor.on_geometry_changed(surface, width, height)
    }

    /// Surface is gone: stop requesting frames and unsubscribe the sensor.
    pub fn on_surface_destroyed(&mut self) {
        info!(target: "engine", "Surface destroyed");
        self.frames.remove();
        self.set_sensor_subscribed(false);
        self.compositor.clear_geometry();
    }

    /// Stops and joins the physics thread. Safe to call more than once.
    pub fn on_engine_destroyed(&mut self) {
        if self.destroyed {
            return;
        }
        info!(target: "engine", "Engine destroyed after {} frames", self.frames.frame_count());

        self.physics.stop();
        self.set_sensor_subscribed(false);
        self.frames.remove();
        self.destroyed = true;
    }

    //--- Frames -----------------------------------------------------------

    /// Display-refresh callback.
    ///
    /// Draws when the frame callback is posted and answers whether the host
    /// should call again at the next refresh.
    ///
    /// # Errors
    ///
    /// Propagates presentation failures of `surface`.
    pub fn on_frame<S: RenderSurface>(&mut self, surface: &mut S) -> Result<FrameRequest, S::Error> {
        if !self.frames.begin_frame() {
            trace!(target: "engine", "Frame callback not posted, skipping");
            return Ok(FrameRequest::Stop);
        }

        self.compositor.render_frame(surface)?;
        Ok(self.frames.end_frame())
    }

    //--- Queries ----------------------------------------------------------

    pub fn camera_offset(&self) -> Vec2 {
        self.physics.offset()
    }

    pub fn is_visible(&self) -> bool {
        self.physics.handle().is_visible()
    }

    pub fn is_sensor_subscribed(&self) -> bool {
        self.sensor_subscribed.load(Ordering::Acquire)
    }

    pub fn is_physics_running(&self) -> bool {
        self.physics.is_running()
    }

    pub fn frames_requested(&self) -> bool {
        self.frames.is_posted()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames.frame_count()
    }

    //--- Desktop Preview --------------------------------------------------

    /// Runs the engine in a desktop window until it is closed.
    ///
    /// The cursor stands in for the gyroscope. Blocks the calling thread,
    /// which must be the main thread on macOS.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop or the pixel surface
    /// cannot be created.
    pub fn run_preview(self, config: PreviewConfig) -> Result<(), PlatformError> {
        Platform::new(self, config).run()
    }

    //--- Internal Helpers -------------------------------------------------

    fn set_sensor_subscribed(&self, subscribed: bool) {
        let was = self.sensor_subscribed.swap(subscribed, Ordering::AcqRel);
        if was != subscribed {
            debug!(
                target: "engine",
                "Sensor {}",
                if subscribed { "subscribed" } else { "unsubscribed" }
            );
        }
    }
}

impl Drop for WallpaperEngine {
    fn drop(&mut self) {
        self.on_engine_destroyed();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compositor::PixelBuffer;
    use crossbeam_channel::unbounded;
    use std::thread;

    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn builder() -> WallpaperEngineBuilder {
        WallpaperEngineBuilder::new(
            LayerImage::solid(1000, 2000, BLUE),
            LayerImage::solid(1000, 2000, [0, 0, 0, 0]),
        )
    }

    fn engine() -> WallpaperEngine {
        builder().build().unwrap()
    }

    //=====================================================================
    // Builder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = builder();
        assert_eq!(builder.physics, PhysicsConfig::default());
        assert_eq!(builder.compositor, CompositorConfig::default());
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let builder = builder()
            .with_tick_period(Duration::from_millis(2))
            .with_decay(0.9)
            .with_stale_threshold(Duration::from_millis(500))
            .with_overscan(1.2)
            .with_motion_scale(2.0)
            .with_clear_color([1, 2, 3, 255]);

        assert_eq!(builder.physics.tick_period, Duration::from_millis(2));
        assert_eq!(builder.physics.decay, 0.9);
        assert_eq!(builder.physics.stale_threshold, Duration::from_millis(500));
        assert_eq!(builder.compositor.overscan, 1.2);
        assert_eq!(builder.compositor.motion_scale, 2.0);
        assert_eq!(builder.compositor.clear_color, [1, 2, 3, 255]);
    }

    #[test]
    #[should_panic(expected = "Tick period must be positive")]
    fn builder_with_tick_period_panics_on_zero() {
        builder().with_tick_period(Duration::ZERO);
    }

    #[test]
    #[should_panic(expected = "Decay must be in [0, 1)")]
    fn builder_with_decay_panics_on_one() {
        builder().with_decay(1.0);
    }

    #[test]
    #[should_panic(expected = "Overscan must be positive")]
    fn builder_with_overscan_panics_on_negative() {
        builder().with_overscan(-1.0);
    }

    #[test]
    #[should_panic(expected = "Stale threshold must be positive")]
    fn builder_with_stale_threshold_panics_on_zero() {
        builder().with_stale_threshold(Duration::ZERO);
    }

    //=====================================================================
    // Lifecycle Tests
    //=====================================================================

    #[test]
    fn build_starts_physics_and_posts_frames() {
        let engine = engine();
        assert!(engine.is_physics_running());
        assert!(engine.is_sensor_subscribed());
        assert!(engine.frames_requested());
        assert!(engine.is_visible());
    }

    #[test]
    fn samples_move_the_camera() {
        let engine = engine();
        assert!(engine.deliver_sample(1.0, 0.5));

        thread::sleep(Duration::from_millis(50));

        let offset = engine.camera_offset();
        assert!(offset.x > 0.0 && offset.y > 0.0, "camera did not move: {:?}", offset);
    }

    #[test]
    fn hiding_unsubscribes_and_stops_frames() {
        let mut engine = engine();
        engine.on_visibility_changed(false).unwrap();

        assert!(!engine.is_visible());
        assert!(!engine.is_sensor_subscribed());
        assert!(!engine.frames_requested());
        assert!(!engine.deliver_sample(1.0, 1.0));
        // Physics keeps ticking while hidden.
        assert!(engine.is_physics_running());
    }

    #[test]
    fn showing_again_resumes_everything() {
        let mut engine = engine();
        engine.on_visibility_changed(false).unwrap();
        engine.on_visibility_changed(true).unwrap();

        assert!(engine.is_visible());
        assert!(engine.is_sensor_subscribed());
        assert!(engine.frames_requested());
        assert!(engine.deliver_sample(1.0, 1.0));
    }

    #[test]
    fn sample_sink_follows_subscription() {
        let mut engine = engine();
        let sink = engine.sample_sink();

        engine.on_visibility_changed(false).unwrap();
        assert!(!sink.deliver(SensorSample::new(1.0, 1.0)));

        engine.on_visibility_changed(true).unwrap();
        assert!(sink.deliver(SensorSample::new(1.0, 1.0)));
    }

    #[test]
    fn surface_destroyed_stops_frames_and_sensor() {
        let mut engine = engine();
        let mut surface = PixelBuffer::new(500, 1000);
        engine.on_surface_created(&mut surface, 500, 1000).unwrap();

        engine.on_surface_destroyed();

        assert!(!engine.frames_requested());
        assert!(!engine.is_sensor_subscribed());
        assert_eq!(engine.on_frame(&mut surface).unwrap(), FrameRequest::Stop);
    }

    #[test]
    fn engine_destroyed_joins_physics_and_is_idempotent() {
        let mut engine = engine();
        engine.on_engine_destroyed();
        engine.on_engine_destroyed();

        assert!(!engine.is_physics_running());
        assert!(!engine.is_sensor_subscribed());
        assert!(!engine.frames_requested());
    }

    #[test]
    fn visibility_after_destroy_does_not_restart() {
        let mut engine = engine();
        engine.on_engine_destroyed();
        engine.on_visibility_changed(true).unwrap();

        assert!(!engine.is_physics_running());
        assert!(!engine.frames_requested());
    }

    //=====================================================================
    // Frame Tests
    //=====================================================================

    #[test]
    fn surface_created_draws_immediately() {
        let mut engine = engine();
        let mut surface = PixelBuffer::new(500, 1000);

        let outcome = engine.on_surface_created(&mut surface, 500, 1000).unwrap();

        assert!(matches!(outcome, FrameOutcome::Composited(_)));
        assert_eq!(surface.presented_frames(), 1);
        assert_eq!(surface.pixel(250, 500), BLUE);
    }

    #[test]
    fn frames_reschedule_while_visible() {
        let mut engine = engine();
        let mut surface = PixelBuffer::new(500, 1000);
        engine.on_surface_changed(&mut surface, 500, 1000).unwrap();

        for _ in 0..3 {
            assert_eq!(engine.on_frame(&mut surface).unwrap(), FrameRequest::Next);
        }

        assert_eq!(engine.frame_count(), 3);
        assert_eq!(surface.presented_frames(), 4);
    }

    #[test]
    fn hidden_engine_does_not_draw() {
        let mut engine = engine();
        let mut surface = PixelBuffer::new(10, 10);
        engine.on_visibility_changed(false).unwrap();

        assert_eq!(engine.on_frame(&mut surface).unwrap(), FrameRequest::Stop);
        assert_eq!(surface.presented_frames(), 0);
    }

    #[test]
    fn frame_before_geometry_only_clears() {
        let (tx, rx) = unbounded();
        let mut engine = builder().with_diagnostics(tx).build().unwrap();
        let mut surface = PixelBuffer::new(4, 4);

        assert_eq!(engine.on_frame(&mut surface).unwrap(), FrameRequest::Next);

        assert!(surface.as_bytes().chunks(4).all(|p| p == [0, 0, 0, 255]));
        assert!(rx.try_iter().any(|d| d == Diagnostic::GeometryUnset));
    }

    //=====================================================================
    // EngineError Tests
    //=====================================================================

    #[test]
    fn engine_error_display_and_source() {
        let err = EngineError::ThreadSpawn(io::Error::new(io::ErrorKind::Other, "no threads"));
        assert_eq!(err.to_string(), "Failed to spawn physics thread: no threads");
        assert!(std::error::Error::source(&err).is_some());
    }
}
