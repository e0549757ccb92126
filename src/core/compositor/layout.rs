//=========================================================================
// Parallax Layout
//=========================================================================
//
// Rectangle math for one frame.
//
// Pipeline:
//   ratio        = min(bg_w / surf_w, bg_h / surf_h)     (integer division)
//   resized      = (bg / ratio) * overscan               (truncated)
//   shift        = (surface - resized) / 2               (integer division)
//   displacement = camera * motion_scale                 (truncated)
//   destination  = resized rect moved by shift + displacement
//
// The integer divisions are deliberate: they snap the scale to whole
// ratios and reproduce the lo-fi sizing the wallpaper has always had.
// A ratio that truncates to zero (surface larger than the image) is
// clamped to 1.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::CompositorConfig;
use crate::core::geometry::{Rect, SurfaceSize};

//=== ParallaxLayout ======================================================

/// Intermediate and final rectangles of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallaxLayout {
    /// Integer downscale ratio of the background relative to the surface.
    pub ratio: i32,

    /// Scaled, overscanned layer extent anchored at the origin.
    pub resized: Rect,

    /// Offset that centres `resized` on the surface.
    pub shift: (i32, i32),

    /// Camera-driven motion, already inverted and scaled.
    pub displacement: (i32, i32),

    /// Where both layers are drawn.
    pub destination: Rect,
}

impl ParallaxLayout {
    /// Lays out a background of `image` pixels on `surface` for `camera`.
    ///
    /// `surface` must not be degenerate; callers check
    /// [`SurfaceSize::is_degenerate`] first.
    pub fn compute(
        image: SurfaceSize,
        surface: SurfaceSize,
        camera: Vec2,
        config: &CompositorConfig,
    ) -> Self {
        debug_assert!(!surface.is_degenerate());

        let (image_w, image_h) = (image.width as i32, image.height as i32);
        let (surface_w, surface_h) = (surface.width as i32, surface.height as i32);

        //--- Step 1: Whole-number aspect fit -----------------------------
        let ratio_x = image_w / surface_w;
        let ratio_y = image_h / surface_h;
        let ratio = ratio_x.min(ratio_y).max(1);

        //--- Step 2: Overscan --------------------------------------------
        let resized = Rect::from_size(
            ((image_w / ratio) as f32 * config.overscan) as i32,
            ((image_h / ratio) as f32 * config.overscan) as i32,
        );

        //--- Step 3: Centre ----------------------------------------------
        let shift = (
            (surface_w - resized.width()) / 2,
            (surface_h - resized.height()) / 2,
        );

        //--- Step 4: Camera motion ---------------------------------------
        let displacement = (
            (camera.x * config.motion_scale) as i32,
            (camera.y * config.motion_scale) as i32,
        );

        // Float-to-int casts saturate, so a runaway camera can land on the
        // i32 limits here.
        let destination = resized.offset(
            shift.0.saturating_add(displacement.0),
            shift.1.saturating_add(displacement.1),
        );

        Self {
            ratio,
            resized,
            shift,
            displacement,
            destination,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(image: (u32, u32), surface: (u32, u32), camera: Vec2) -> ParallaxLayout {
        ParallaxLayout::compute(
            SurfaceSize::new(image.0, image.1),
            SurfaceSize::new(surface.0, surface.1),
            camera,
            &CompositorConfig::default(),
        )
    }

    #[test]
    fn reference_layout_at_rest() {
        let layout = layout((1000, 2000), (500, 1000), Vec2::ZERO);

        assert_eq!(layout.ratio, 2);
        assert_eq!(layout.resized, Rect::new(0, 0, 700, 1400));
        assert_eq!(layout.shift, (-100, -200));
        assert_eq!(layout.displacement, (0, 0));
        assert_eq!(layout.destination, Rect::new(-100, -200, 600, 1200));
    }

    #[test]
    fn ratio_uses_smaller_truncated_quotient() {
        // 1080 / 500 = 2, 2400 / 700 = 3
        let layout = layout((1080, 2400), (500, 700), Vec2::ZERO);
        assert_eq!(layout.ratio, 2);
        assert_eq!(layout.resized, Rect::new(0, 0, 756, 1680));
    }

    #[test]
    fn camera_moves_destination_opposite_and_scaled() {
        let layout = layout((1000, 2000), (500, 1000), Vec2::new(10.0, -5.0));

        assert_eq!(layout.displacement, (-14, 7));
        assert_eq!(layout.destination, Rect::new(-114, -193, 586, 1207));
    }

    #[test]
    fn displacement_truncates_toward_zero() {
        let layout = layout((1000, 2000), (500, 1000), Vec2::new(1.0, -1.0));
        // -1.4 -> -1, 1.4 -> 1
        assert_eq!(layout.displacement, (-1, 1));
    }

    #[test]
    fn surface_larger_than_image_clamps_ratio() {
        let layout = layout((800, 600), (1920, 1080), Vec2::ZERO);

        assert_eq!(layout.ratio, 1);
        assert_eq!(layout.resized, Rect::new(0, 0, 1120, 840));
        assert_eq!(layout.shift, (400, 120));
    }

    #[test]
    fn runaway_camera_saturates_destination() {
        let layout = layout((1000, 2000), (500, 1000), Vec2::new(1.662_899_6e9, -1.0e10));

        assert_eq!(layout.displacement, (i32::MIN, i32::MAX));
        assert_eq!(layout.destination.left, i32::MIN);
        assert_eq!(layout.destination.bottom, i32::MAX);
        assert!(layout.destination.intersect(&Rect::from_size(500, 1000)).is_none());
    }

    #[test]
    fn destination_keeps_resized_extent() {
        let layout = layout((1000, 2000), (500, 1000), Vec2::new(123.4, -56.7));
        assert_eq!(layout.destination.width(), layout.resized.width());
        assert_eq!(layout.destination.height(), layout.resized.height());
    }
}
