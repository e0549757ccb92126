//=========================================================================
// Parallax Wallpaper — Library Root
//
// This crate implements the core of a gyroscope-driven live wallpaper:
// two image layers composited with a camera offset that a fixed-tick
// physics thread smooths out of raw angular-rate samples.
//
// Responsibilities:
// - Expose the wallpaper engine facade (`WallpaperEngine`)
// - Keep the desktop preview host (`platform`) hidden from end users
// - Keep the physics and compositing systems (`core`) independent of any
//   windowing or sensor backend
//
// Typical usage:
// ```no_run
// use parallax_wallpaper::{PreviewConfig, WallpaperEngineBuilder};
// use parallax_wallpaper::core::compositor::LayerImage;
//
// let background = LayerImage::solid(1080, 2400, [30, 30, 60, 255]);
// let foreground = LayerImage::solid(1080, 2400, [0, 0, 0, 0]);
//
// let engine = WallpaperEngineBuilder::new(background, foreground)
//     .build()
//     .expect("physics thread");
// engine.run_preview(PreviewConfig::default()).expect("preview");
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the physics integrator, the frame compositor and the
// contract types shared with platform glue. It is public so hosts other
// than the bundled preview can drive the systems directly.
//
// `logging` initialises the global logger for binaries.
//
pub mod core;
pub mod logging;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit/pixels desktop host and is kept private.
//
// `engine` defines the wallpaper engine facade and its frame loop.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{EngineError, FrameRequest, WallpaperEngine, WallpaperEngineBuilder};
pub use platform::{demo_layers, PlatformError, PreviewConfig};
