//=========================================================================
// Platform Subsystem (desktop preview)
//
// Hosts a `WallpaperEngine` in a winit window so the wallpaper can be
// previewed without a phone. Plays the part of the wallpaper service.
//
// Architecture:
// ```text
//  Main Thread (winit)                       Physics Thread
//  ┌──────────────────────────────────┐     ┌──────────────────┐
//  │  Winit Event Loop                │     │  PhysicsState    │
//  │   ├─ Resized ──► on_surface_changed    │   (fixed tick)   │
//  │   ├─ Occluded ─► on_visibility_changed │                  │
//  │   ├─ CursorMoved ─► GyroEmulator │     │                  │
//  │   └─ RedrawRequested             │     │                  │
//  │        ├─ flush sample ──────────┼────►│  raw input       │
//  │        ├─ on_frame (pixels) ◄────┼─────│  camera offset   │
//  │        └─ FrameRequest::Next     │     └──────────────────┘
//  │             ─► request_redraw    │
//  └──────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = display refresh**: the engine re-registers itself
//   by answering `FrameRequest::Next`, which becomes `request_redraw()`
// - **Cursor as gyroscope**: motion accumulated between frames is flushed
//   as one angular-rate sample at each frame boundary
// - **Window created in `resumed()`**: required on mobile targets, harmless
//   on desktop
//
//=========================================================================

//=== Submodules ==========================================================

mod demo_layers;
mod gyro_emulator;
mod pixels_surface;

pub use demo_layers::demo_layers;

//=== External Crates =====================================================

use std::fmt;
use std::sync::Arc;

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::SampleSink;
use crate::engine::{FrameRequest, WallpaperEngine};
use gyro_emulator::GyroEmulator;
use pixels_surface::PixelsSurface;

//=== PlatformError =======================================================

/// Preview host errors. All of them end the preview.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),

    /// The OS refused to create the preview window.
    WindowCreation(winit::error::OsError),

    /// No GPU adapter or surface for the frame buffer.
    SurfaceCreation(pixels::Error),

    /// The frame buffer could not follow a window resize.
    SurfaceResize(pixels::TextureError),
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::SurfaceCreation(e) => write!(f, "Pixel surface creation failed: {}", e),
            Self::SurfaceResize(e) => write!(f, "Pixel surface resize failed: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== PreviewConfig =======================================================

/// Desktop preview window settings.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub title: String,

    /// Initial logical window size.
    pub width: u32,
    pub height: u32,

    /// Angular rate per pixel of cursor motion within one frame.
    pub cursor_sensitivity: f32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            title: "Parallax Wallpaper".to_string(),
            width: 450,
            height: 1000,
            cursor_sensitivity: 0.05,
        }
    }
}

//=== Platform ============================================================

/// Window currently showing the wallpaper.
struct PreviewWindow {
    window: Arc<Window>,
    surface: PixelsSurface,
}

/// Event-loop side of the preview.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(engine, config)`
/// 2. **Execution**: `run()` blocks in the winit event loop
/// 3. **Resume**: window + pixel surface created, surface reported
/// 4. **Shutdown**: close requested → surface and engine destroyed → exit
pub(crate) struct Platform {
    engine: WallpaperEngine,
    config: PreviewConfig,
    window: Option<PreviewWindow>,
    gyro: GyroEmulator,
    sink: SampleSink,
    failure: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(engine: WallpaperEngine, config: PreviewConfig) -> Self {
        info!(target: "platform", "Preview platform initialized");
        Self {
            sink: engine.sample_sink(),
            gyro: GyroEmulator::new(config.cursor_sensitivity),
            engine,
            config,
            window: None,
            failure: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot start, or the first
    /// fatal error raised while it ran.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        self.engine.on_engine_destroyed();
        info!(target: "platform", "Preview event loop exited");

        match self.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Records a fatal error and leaves the event loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PlatformError) {
        error!(target: "platform", "{}", error);
        self.failure.get_or_insert(error);
        self.engine.on_surface_destroyed();
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(PlatformError::WindowCreation)?,
        );
        let mut surface = PixelsSurface::new(Arc::clone(&window))?;

        let size = window.inner_size();
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            size.width,
            size.height,
            window.scale_factor()
        );

        if let Err(e) = self.engine.on_surface_created(&mut surface, size.width, size.height) {
            warn!(target: "platform", "Initial frame not presented: {}", e);
        }

        window.request_redraw();
        self.window = Some(PreviewWindow { window, surface });
        Ok(())
    }

    fn set_visible(&mut self, event_loop: &ActiveEventLoop, visible: bool) {
        if let Err(e) = self.engine.on_visibility_changed(visible) {
            error!(target: "platform", "Visibility change failed: {}", e);
            event_loop.exit();
            return;
        }

        if visible {
            if let Some(preview) = &self.window {
                preview.window.request_redraw();
            }
        }
    }

    fn redraw(&mut self) {
        let Some(preview) = self.window.as_mut() else {
            return;
        };

        // Frame boundary: flush the cursor motion of the last frame.
        let sample = self.gyro.take_sample();
        trace!(target: "platform::input", "Emulated gyro sample {:?}", sample);
        self.sink.deliver(sample);

        match self.engine.on_frame(&mut preview.surface) {
            Ok(FrameRequest::Next) => preview.window.request_redraw(),
            Ok(FrameRequest::Stop) => trace!(target: "platform", "Frame loop paused"),
            Err(e) => {
                // The next resize or visibility change re-posts the frame loop.
                error!(target: "platform", "Frame presentation failed: {}", e);
            }
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called at startup and on mobile resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
            return;
        }

        self.set_visible(event_loop, true);
    }

    /// Mobile suspend: the surface goes away with the window.
    fn suspended(&mut self, event_loop: &ActiveEventLoop) {
        info!(target: "platform", "Suspended");
        self.set_visible(event_loop, false);
        self.engine.on_surface_destroyed();
        self.window = None;
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.engine.on_surface_destroyed();
                self.engine.on_engine_destroyed();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                let Some(preview) = self.window.as_mut() else {
                    return;
                };
                if let Err(e) = preview.surface.resize(size.width, size.height) {
                    self.fail(event_loop, e);
                    return;
                }
                if let Err(e) =
                    self.engine
                        .on_surface_changed(&mut preview.surface, size.width, size.height)
                {
                    warn!(target: "platform", "Resize frame not presented: {}", e);
                }
            }

            WindowEvent::Occluded(occluded) => {
                self.set_visible(event_loop, !occluded);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.gyro.on_cursor_moved(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } => {
                self.gyro.on_cursor_left();
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {
                // Ignore: focus, keyboard, scale factor, etc.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
