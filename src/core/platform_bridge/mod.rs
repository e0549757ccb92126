//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges platform glue (Android wallpaper service, desktop preview, ...)
// with the core systems.
//
// This module defines what the platform hands to the core, so backends can
// be swapped without touching physics or compositing code.
//
//=========================================================================

//=== Module Declarations =================================================

mod interface;

//=== Public API ==========================================================

pub use interface::{SampleSink, SensorSample};
