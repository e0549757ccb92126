//=========================================================================
// Layer Image
//=========================================================================
//
// Immutable RGBA8 pixel buffer for one wallpaper layer. Loaded once by the
// host and shared (cheaply cloned) for the lifetime of the engine.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::Arc;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;

//=== ImageError ==========================================================

/// Pixel data that does not describe a valid image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Width or height is zero.
    EmptyDimensions { width: u32, height: u32 },

    /// Buffer length differs from `width * height * 4`.
    LengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDimensions { width, height } => {
                write!(f, "Image has an empty dimension: {}x{}", width, height)
            }
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "RGBA buffer holds {} bytes, expected {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for ImageError {}

//=== LayerImage ==========================================================

/// Straight-alpha RGBA8 image, row-major, no padding.
#[derive(Clone, PartialEq, Eq)]
pub struct LayerImage {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl LayerImage {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Wraps an RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError`] for a zero dimension or a buffer whose length
    /// is not `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::EmptyDimensions { width, height });
        }

        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(ImageError::LengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// Single-colour image. Zero dimensions are raised to 1.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let pixels: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * Self::BYTES_PER_PIXEL)
            .collect();

        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    /// Image whose pixels are produced by `shade(x, y)`. Zero dimensions
    /// are raised to 1.
    pub fn from_fn<F>(width: u32, height: u32, mut shade: F) -> Self
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        let (width, height) = (width.max(1), height.max(1));
        let mut pixels = Vec::with_capacity(width as usize * height as usize * Self::BYTES_PER_PIXEL);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&shade(x, y));
            }
        }

        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full-image source rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width as i32, self.height as i32)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA of the pixel at `(x, y)`. Coordinates must be in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_PIXEL;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

// Pixel dumps are useless in logs.
impl fmt::Debug for LayerImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba_accepts_exact_length() {
        let image = LayerImage::from_rgba(2, 3, vec![0; 24]).unwrap();
        assert_eq!((image.width(), image.height()), (2, 3));
        assert_eq!(image.bounds(), Rect::new(0, 0, 2, 3));
    }

    #[test]
    fn from_rgba_rejects_wrong_length() {
        assert_eq!(
            LayerImage::from_rgba(2, 2, vec![0; 15]),
            Err(ImageError::LengthMismatch { expected: 16, actual: 15 })
        );
    }

    #[test]
    fn from_rgba_rejects_empty_dimensions() {
        assert_eq!(
            LayerImage::from_rgba(0, 4, vec![]),
            Err(ImageError::EmptyDimensions { width: 0, height: 4 })
        );
    }

    #[test]
    fn solid_fills_every_pixel() {
        let image = LayerImage::solid(3, 2, [1, 2, 3, 4]);
        assert_eq!(image.pixels().len(), 24);
        assert_eq!(image.pixel(2, 1), [1, 2, 3, 4]);
    }

    #[test]
    fn from_fn_shades_each_coordinate() {
        let image = LayerImage::from_fn(3, 2, |x, y| [x as u8, y as u8, 0, 255]);
        assert_eq!(image.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(image.pixel(2, 1), [2, 1, 0, 255]);
    }

    #[test]
    fn pixel_reads_row_major() {
        let mut data = vec![0; 16];
        data[12..16].copy_from_slice(&[9, 8, 7, 6]);
        let image = LayerImage::from_rgba(2, 2, data).unwrap();
        assert_eq!(image.pixel(1, 1), [9, 8, 7, 6]);
    }

    #[test]
    fn debug_omits_pixels() {
        let debug = format!("{:?}", LayerImage::solid(4, 4, [0; 4]));
        assert_eq!(debug, "LayerImage { width: 4, height: 4 }");
    }
}
