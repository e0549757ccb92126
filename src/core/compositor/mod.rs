//=========================================================================
// Frame Compositor
//
// Renders the two-layer parallax composite once per display refresh.
//
// Responsibilities:
// - Track the output surface geometry reported by the host
// - Snapshot the camera offset from the physics integrator
// - Lay out both layers (integer aspect fit, overscan, centring, motion)
// - Clear, draw background, draw foreground, present
//
//=========================================================================

//=== Module Declarations =================================================

mod frame_compositor;
mod layer;
mod layout;
mod surface;

//=== Public API ==========================================================

pub use frame_compositor::{FrameCompositor, FrameOutcome};
pub use layer::{ImageError, LayerImage};
pub use layout::ParallaxLayout;
pub use surface::{PixelBuffer, RenderSurface, RgbaFrame};

//=== CompositorConfig ====================================================

/// Tunables of the compositor.
///
/// # Default Values
///
/// - **overscan**: 1.4 (headroom so motion never exposes an edge)
/// - **motion_scale**: -1.4 (layers move against the device tilt)
/// - **clear_color**: opaque black
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositorConfig {
    pub overscan: f32,
    pub motion_scale: f32,
    pub clear_color: [u8; 4],
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            overscan: 1.4,
            motion_scale: -1.4,
            clear_color: [0, 0, 0, 255],
        }
    }
}
