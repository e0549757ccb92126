//=========================================================================
// Render Surface
//=========================================================================
//
// Output surface abstraction and the software rasteriser behind it.
//
// Architecture:
//   FrameCompositor ─► RenderSurface (trait)
//                        ├─ PixelBuffer      (in-memory, tests/headless)
//                        └─ platform surface (desktop preview window)
//
// Both implementations draw through `RgbaFrame`, a borrowed view over a
// tightly packed RGBA8 buffer: nearest-neighbour scaling, clipping to the
// frame bounds, source-over blending with straight alpha.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::convert::Infallible;

//=== Internal Dependencies ===============================================

use super::LayerImage;
use crate::core::geometry::{Rect, SurfaceSize};

//=== RenderSurface =======================================================

/// Destination of a composited frame.
pub trait RenderSurface {
    type Error: std::error::Error;

    /// Fills the whole surface with `rgba`.
    fn clear(&mut self, rgba: [u8; 4]);

    /// Draws the `src` region of `image` scaled into `dst`.
    fn draw_image(&mut self, image: &LayerImage, src: Rect, dst: Rect);

    /// Hands the finished frame to the display.
    fn present(&mut self) -> Result<(), Self::Error>;
}

//=== RgbaFrame ===========================================================

/// Mutable view over a packed RGBA8 frame.
pub struct RgbaFrame<'a> {
    data: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> RgbaFrame<'a> {
    /// Returns `None` when `data` is too small for `size`.
    pub fn new(data: &'a mut [u8], size: SurfaceSize) -> Option<Self> {
        let needed = size.width as usize * size.height as usize * LayerImage::BYTES_PER_PIXEL;
        (data.len() >= needed).then_some(Self { data, size })
    }

    pub fn clear(&mut self, rgba: [u8; 4]) {
        for pixel in self.data.chunks_exact_mut(LayerImage::BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&rgba);
        }
    }

    pub fn draw_image(&mut self, image: &LayerImage, src: Rect, dst: Rect) {
        let Some(src) = src.intersect(&image.bounds()) else {
            return;
        };
        if dst.is_empty() {
            return;
        }
        let Some(visible) = dst.intersect(&self.size.bounds()) else {
            return;
        };

        // Index math runs in i64: destinations may sit near the i32 limits.
        let width = self.size.width as usize;
        let (dst_left, dst_top) = (dst.left as i64, dst.top as i64);
        let (dst_w, dst_h) = (dst.right as i64 - dst_left, dst.bottom as i64 - dst_top);
        let (src_w, src_h) = (src.width() as i64, src.height() as i64);
        let (src_last_x, src_last_y) = (src.right as i64 - 1, src.bottom as i64 - 1);

        for y in visible.top..visible.bottom {
            let sy = (src.top as i64 + (y as i64 - dst_top) * src_h / dst_h).min(src_last_y);
            let row = y as usize * width;

            for x in visible.left..visible.right {
                let sx = (src.left as i64 + (x as i64 - dst_left) * src_w / dst_w).min(src_last_x);
                let source = image.pixel(sx as u32, sy as u32);

                let i = (row + x as usize) * LayerImage::BYTES_PER_PIXEL;
                blend_over(&mut self.data[i..i + LayerImage::BYTES_PER_PIXEL], source);
            }
        }
    }
}

/// Source-over compositing of a straight-alpha pixel onto `dst`.
#[inline]
fn blend_over(dst: &mut [u8], src: [u8; 4]) {
    match src[3] {
        0 => {}
        255 => dst.copy_from_slice(&src),
        alpha => {
            let a = alpha as u32;
            let inv = 255 - a;
            for c in 0..3 {
                dst[c] = ((src[c] as u32 * a + dst[c] as u32 * inv + 127) / 255) as u8;
            }
            dst[3] = (a + (dst[3] as u32 * inv + 127) / 255) as u8;
        }
    }
}

//=== PixelBuffer =========================================================

/// Owned in-memory RGBA8 surface.
///
/// Presenting only counts frames, which makes it the surface of choice for
/// headless hosts and tests.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    size: SurfaceSize,
    data: Vec<u8>,
    presented: u64,
}

impl PixelBuffer {
    /// Creates a transparent buffer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let size = SurfaceSize::new(width, height);
        Self {
            size,
            data: vec![0; width as usize * height as usize * LayerImage::BYTES_PER_PIXEL],
            presented: 0,
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.size.width as usize + x as usize) * LayerImage::BYTES_PER_PIXEL;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of frames presented so far.
    pub fn presented_frames(&self) -> u64 {
        self.presented
    }

    fn frame(&mut self) -> RgbaFrame<'_> {
        RgbaFrame {
            data: &mut self.data,
            size: self.size,
        }
    }
}

impl RenderSurface for PixelBuffer {
    type Error = Infallible;

    fn clear(&mut self, rgba: [u8; 4]) {
        self.frame().clear(rgba);
    }

    fn draw_image(&mut self, image: &LayerImage, src: Rect, dst: Rect) {
        self.frame().draw_image(image, src, dst);
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.presented += 1;
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
