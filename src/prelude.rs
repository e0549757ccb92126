//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types.
//
// Usage:
//   use parallax_wallpaper::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine facade
pub use crate::engine::{FrameRequest, WallpaperEngine, WallpaperEngineBuilder};

// Physics
pub use crate::core::physics::{PhysicsConfig, PhysicsHandle, PhysicsIntegrator};

// Compositing
pub use crate::core::compositor::{
    CompositorConfig, FrameCompositor, LayerImage, PixelBuffer, RenderSurface,
};

// Platform contract
pub use crate::core::diagnostics::Diagnostic;
pub use crate::core::geometry::{Rect, SurfaceSize};
pub use crate::core::platform_bridge::{SampleSink, SensorSample};
