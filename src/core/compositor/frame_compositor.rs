//=========================================================================
// Frame Compositor
//=========================================================================
//
// Per-frame draw routine.
//
// Frame lifecycle:
//   snapshot offset ─► clear ─► geometry known?
//                                 ├─ no  ─► present (cleared only)
//                                 └─ yes ─► layout ─► background
//                                                  ─► foreground ─► present
//
// Both layers share one destination rectangle derived from the background
// size; no depth differential is applied between them.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{CompositorConfig, LayerImage, ParallaxLayout, RenderSurface};
use crate::core::diagnostics::{Diagnostic, DiagnosticSink};
use crate::core::geometry::SurfaceSize;
use crate::core::physics::PhysicsHandle;

//=== FrameOutcome ========================================================

/// What `render_frame` put on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Both layers drawn with this layout.
    Composited(ParallaxLayout),

    /// Geometry unknown; the surface was only cleared.
    ClearedOnly,
}

//=== FrameCompositor =====================================================

/// Owns the two layers and the current surface geometry.
pub struct FrameCompositor {
    background: LayerImage,
    foreground: LayerImage,
    geometry: Option<SurfaceSize>,
    physics: PhysicsHandle,
    config: CompositorConfig,
    diagnostics: DiagnosticSink,
}

impl FrameCompositor {
    //--- Construction -----------------------------------------------------

    /// Geometry starts unset until the host reports a surface.
    pub fn new(
        background: LayerImage,
        foreground: LayerImage,
        physics: PhysicsHandle,
        config: CompositorConfig,
        diagnostics: DiagnosticSink,
    ) -> Self {
        Self {
            background,
            foreground,
            geometry: None,
            physics,
            config,
            diagnostics,
        }
    }

    //--- Geometry ---------------------------------------------------------

    /// Records the new surface size and redraws immediately.
    pub fn on_geometry_changed<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        width: u32,
        height: u32,
    ) -> Result<FrameOutcome, S::Error> {
        debug!(target: "compositor", "Surface geometry set to {}x{}", width, height);
        self.geometry = Some(SurfaceSize::new(width, height));
        self.render_frame(surface)
    }

    /// Forgets the geometry (surface gone).
    pub fn clear_geometry(&mut self) {
        self.geometry = None;
    }

    pub fn geometry(&self) -> Option<SurfaceSize> {
        self.geometry
    }

    //--- Rendering --------------------------------------------------------

    /// Draws the current state into `surface` and presents it.
    ///
    /// Safe before any geometry is known: the surface is cleared and
    /// presented, and no layout is attempted.
    ///
    /// # Errors
    ///
    /// Only presentation can fail; the error comes from the surface.
    pub fn render_frame<S: RenderSurface>(&self, surface: &mut S) -> Result<FrameOutcome, S::Error> {
        let camera = self.physics.offset();

        surface.clear(self.config.clear_color);

        let outcome = match self.geometry.filter(|size| !size.is_degenerate()) {
            None => {
                debug!(target: "compositor", "Frame requested before surface geometry was set");
                self.diagnostics.emit(Diagnostic::GeometryUnset);
                FrameOutcome::ClearedOnly
            }
            Some(size) => {
                let image = SurfaceSize::new(self.background.width(), self.background.height());
                let layout = ParallaxLayout::compute(image, size, camera, &self.config);
                trace!(
                    target: "compositor",
                    "Camera ({:.2}, {:.2}) -> destination {:?}",
                    camera.x,
                    camera.y,
                    layout.destination
                );

                surface.draw_image(&self.background, self.background.bounds(), layout.destination);
                surface.draw_image(&self.foreground, self.foreground.bounds(), layout.destination);
                FrameOutcome::Composited(layout)
            }
        };

        surface.present()?;
        Ok(outcome)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compositor::PixelBuffer;
    use crate::core::geometry::Rect;
    use crossbeam_channel::unbounded;
    use glam::Vec2;
    use std::convert::Infallible;

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const RED: [u8; 4] = [255, 0, 0, 255];

    fn compositor(physics: PhysicsHandle) -> FrameCompositor {
        FrameCompositor::new(
            LayerImage::solid(1000, 2000, BLUE),
            LayerImage::solid(1000, 2000, [0, 0, 0, 0]),
            physics,
            CompositorConfig::default(),
            DiagnosticSink::disabled(),
        )
    }

    /// Records draw calls instead of rasterising.
    #[derive(Default)]
    struct RecordingSurface {
        clears: Vec<[u8; 4]>,
        draws: Vec<(u32, u32, Rect, Rect)>,
        presents: usize,
    }

    impl RenderSurface for RecordingSurface {
        type Error = Infallible;

        fn clear(&mut self, rgba: [u8; 4]) {
            self.clears.push(rgba);
        }

        fn draw_image(&mut self, image: &LayerImage, src: Rect, dst: Rect) {
            self.draws.push((image.width(), image.height(), src, dst));
        }

        fn present(&mut self) -> Result<(), Self::Error> {
            self.presents += 1;
            Ok(())
        }
    }

    //=====================================================================
    // Unset Geometry Tests
    //=====================================================================

    #[test]
    fn unset_geometry_clears_and_presents_only() {
        let compositor = compositor(PhysicsHandle::new());
        let mut surface = RecordingSurface::default();

        let outcome = compositor.render_frame(&mut surface).unwrap();

        assert_eq!(outcome, FrameOutcome::ClearedOnly);
        assert_eq!(surface.clears, vec![BLACK]);
        assert!(surface.draws.is_empty());
        assert_eq!(surface.presents, 1);
    }

    #[test]
    fn unset_geometry_emits_diagnostic() {
        let (tx, rx) = unbounded();
        let compositor = FrameCompositor::new(
            LayerImage::solid(4, 4, BLUE),
            LayerImage::solid(4, 4, BLUE),
            PhysicsHandle::new(),
            CompositorConfig::default(),
            DiagnosticSink::new(tx),
        );

        compositor.render_frame(&mut PixelBuffer::new(2, 2)).unwrap();

        assert_eq!(rx.try_recv(), Ok(Diagnostic::GeometryUnset));
    }

    #[test]
    fn zero_sized_geometry_does_not_divide_by_zero() {
        let mut compositor = compositor(PhysicsHandle::new());
        let mut surface = RecordingSurface::default();

        let outcome = compositor.on_geometry_changed(&mut surface, 0, 0).unwrap();

        assert_eq!(outcome, FrameOutcome::ClearedOnly);
        assert!(surface.draws.is_empty());
    }

    //=====================================================================
    // Composition Tests
    //=====================================================================

    #[test]
    fn geometry_change_redraws_immediately() {
        let mut compositor = compositor(PhysicsHandle::new());
        let mut surface = RecordingSurface::default();

        compositor.on_geometry_changed(&mut surface, 500, 1000).unwrap();

        assert_eq!(compositor.geometry(), Some(SurfaceSize::new(500, 1000)));
        assert_eq!(surface.presents, 1);
        assert_eq!(surface.draws.len(), 2);
    }

    #[test]
    fn both_layers_share_destination_and_draw_in_order() {
        let mut compositor = FrameCompositor::new(
            LayerImage::solid(1000, 2000, BLUE),
            LayerImage::solid(250, 500, RED),
            PhysicsHandle::new(),
            CompositorConfig::default(),
            DiagnosticSink::disabled(),
        );
        let mut surface = RecordingSurface::default();

        compositor.on_geometry_changed(&mut surface, 500, 1000).unwrap();

        let destination = Rect::new(-100, -200, 600, 1200);
        assert_eq!(
            surface.draws,
            vec![
                (1000, 2000, Rect::from_size(1000, 2000), destination),
                (250, 500, Rect::from_size(250, 500), destination),
            ]
        );
    }

    #[test]
    fn camera_offset_is_read_each_frame() {
        let physics = PhysicsHandle::new();
        let mut compositor = compositor(physics.clone());
        let mut surface = RecordingSurface::default();
        compositor.on_geometry_changed(&mut surface, 500, 1000).unwrap();

        physics.publish_offset(Vec2::new(10.0, -5.0));
        let outcome = compositor.render_frame(&mut surface).unwrap();

        match outcome {
            FrameOutcome::Composited(layout) => {
                assert_eq!(layout.destination, Rect::new(-114, -193, 586, 1207));
            }
            other => panic!("Expected composited frame, got {:?}", other),
        }
    }

    #[test]
    fn runaway_camera_offset_renders_clear_frame() {
        let physics = PhysicsHandle::new();
        let mut compositor = compositor(physics.clone());
        let mut surface = PixelBuffer::new(500, 1000);

        for camera in [Vec2::new(1.662_899_6e9, 0.0), Vec2::new(-1.0e12, 3.0e11)] {
            physics.publish_offset(camera);
            compositor.on_geometry_changed(&mut surface, 500, 1000).unwrap();

            // Both layers land entirely off-surface.
            assert!(surface.as_bytes().chunks(4).all(|p| p == BLACK));
        }
        assert_eq!(surface.presented_frames(), 2);
    }

    #[test]
    fn foreground_alpha_composites_over_background() {
        let mut compositor = FrameCompositor::new(
            LayerImage::solid(20, 20, BLUE),
            LayerImage::solid(20, 20, [255, 0, 0, 0]),
            PhysicsHandle::new(),
            CompositorConfig::default(),
            DiagnosticSink::disabled(),
        );
        let mut surface = PixelBuffer::new(10, 10);

        compositor.on_geometry_changed(&mut surface, 10, 10).unwrap();

        // Overscanned background covers the whole surface.
        assert!(surface.as_bytes().chunks(4).all(|p| p == BLUE));
        assert_eq!(surface.presented_frames(), 1);
    }

    #[test]
    fn cleared_geometry_falls_back_to_clear_only() {
        let mut compositor = compositor(PhysicsHandle::new());
        let mut surface = RecordingSurface::default();
        compositor.on_geometry_changed(&mut surface, 500, 1000).unwrap();

        compositor.clear_geometry();

        assert_eq!(
            compositor.render_frame(&mut surface).unwrap(),
            FrameOutcome::ClearedOnly
        );
    }
}
