//! Time subsystem.
//!
//! One `FrameClock` per window; `tick()` once per redraw callback. The frame
//! driver uses the clamped delta for time-scaled animation.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
