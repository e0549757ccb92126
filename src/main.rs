//=========================================================================
// parallax-preview
//
// Desktop preview of the parallax wallpaper. Move the cursor over the
// window to tilt the "device".
//
// Usage:
//   RUST_LOG=parallax_wallpaper=debug cargo run --bin parallax-preview
//
//=========================================================================

use std::process::ExitCode;

use log::{error, info};

use parallax_wallpaper::logging::{init_logging, LoggingConfig};
use parallax_wallpaper::{demo_layers, PreviewConfig, WallpaperEngineBuilder};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let (background, foreground) = demo_layers();

    let engine = match WallpaperEngineBuilder::new(background, foreground).build() {
        Ok(engine) => engine,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match engine.run_preview(PreviewConfig::default()) {
        Ok(()) => {
            info!("Preview closed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
