//=========================================================================
// Pixels Surface
//=========================================================================
//
// `RenderSurface` backed by a `pixels` frame buffer bound to the preview
// window. The buffer is kept at the window's physical size so one buffer
// pixel maps to one screen pixel.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::debug;
use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

//=== Internal Dependencies ===============================================

use super::PlatformError;
use crate::core::compositor::{LayerImage, RenderSurface, RgbaFrame};
use crate::core::geometry::{Rect, SurfaceSize};

//=== PixelsSurface =======================================================

pub(crate) struct PixelsSurface {
    pixels: Pixels<'static>,
    size: SurfaceSize,
}

impl PixelsSurface {
    /// Creates a frame buffer matching the window's current inner size.
    pub(crate) fn new(window: Arc<Window>) -> Result<Self, PlatformError> {
        let inner = window.inner_size();
        let size = SurfaceSize::new(inner.width.max(1), inner.height.max(1));

        let texture = SurfaceTexture::new(size.width, size.height, window);
        let pixels =
            Pixels::new(size.width, size.height, texture).map_err(PlatformError::SurfaceCreation)?;

        debug!(target: "platform", "Pixel surface created ({}x{})", size.width, size.height);
        Ok(Self { pixels, size })
    }

    /// Follows a window resize. Zero sizes (minimised) keep the old buffer.
    pub(crate) fn resize(&mut self, width: u32, height: u32) -> Result<(), PlatformError> {
        if width == 0 || height == 0 {
            return Ok(());
        }

        self.pixels
            .resize_surface(width, height)
            .map_err(PlatformError::SurfaceResize)?;
        self.pixels
            .resize_buffer(width, height)
            .map_err(PlatformError::SurfaceResize)?;
        self.size = SurfaceSize::new(width, height);
        Ok(())
    }

    fn frame(&mut self) -> Option<RgbaFrame<'_>> {
        RgbaFrame::new(self.pixels.frame_mut(), self.size)
    }
}

impl RenderSurface for PixelsSurface {
    type Error = pixels::Error;

    fn clear(&mut self, rgba: [u8; 4]) {
        if let Some(mut frame) = self.frame() {
            frame.clear(rgba);
        }
    }

    fn draw_image(&mut self, image: &LayerImage, src: Rect, dst: Rect) {
        if let Some(mut frame) = self.frame() {
            frame.draw_image(image, src, dst);
        }
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.pixels.render()
    }
}
