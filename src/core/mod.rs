//=========================================================================
// Core Systems
//
// Platform-agnostic systems of the wallpaper.
//
// Architecture:
// ```text
//  Sensor context        Physics thread (fixed 5 ms tick)
//  ┌──────────────┐      ┌──────────────────────────────┐
//  │ SampleSink   │─────►│ raw input ─► PhysicsState    │
//  └──────────────┘      │              ├─ decay + add  │
//                        │              └─ staleness    │
//                        │ camera offset ◄──────────────│
//                        └──────────────┬───────────────┘
//                                       │ snapshot (Mutex)
//  Display context                      ▼
//  ┌──────────────────────────────────────────────────┐
//  │ FrameCompositor ─► layout math ─► RenderSurface  │
//  └──────────────────────────────────────────────────┘
// ```
//
// The two loops never call into each other. They share the raw input,
// the camera offset and the visibility flag through `PhysicsHandle`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod compositor;
pub mod diagnostics;
pub mod geometry;
pub mod physics;
pub mod platform_bridge;
