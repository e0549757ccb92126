//=========================================================================
// Demo Layers
//=========================================================================
//
// Procedural stand-ins for the wallpaper's bitmap resources so the preview
// runs without asset files: a dusk gradient with a star grid behind a
// translucent mountain silhouette.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::compositor::LayerImage;

const WIDTH: u32 = 1080;
const HEIGHT: u32 = 2400;

/// Returns `(background, foreground)` at a typical phone resolution.
pub fn demo_layers() -> (LayerImage, LayerImage) {
    (background(), foreground())
}

fn background() -> LayerImage {
    LayerImage::from_fn(WIDTH, HEIGHT, |x, y| {
        let t = y as f32 / HEIGHT as f32;
        let star = x % 97 == 13 && y % 131 == 29;
        if star {
            return [255, 250, 230, 255];
        }
        [
            lerp(18.0, 220.0, t),
            lerp(14.0, 110.0, t),
            lerp(60.0, 90.0, t),
            255,
        ]
    })
}

fn foreground() -> LayerImage {
    LayerImage::from_fn(WIDTH, HEIGHT, |x, y| {
        let u = x as f32 / WIDTH as f32;
        let ridge = 0.62 + 0.06 * (u * 9.0).sin() + 0.03 * (u * 23.0).cos();
        if (y as f32 / HEIGHT as f32) < ridge {
            [0, 0, 0, 0]
        } else {
            [12, 10, 24, 235]
        }
    })
}

fn lerp(from: f32, to: f32, t: f32) -> u8 {
    (from + (to - from) * t).clamp(0.0, 255.0) as u8
}

//=========================================================================
// Unit Tests
//=========================================================================
