//! Prism engine crate.
//!
//! Immediate-mode mesh rendering on top of wgpu: pure geometry builders, a
//! named-program provider, one-shot pipeline/resource setup, and a per-frame
//! driver that owns the animation state.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod geometry;
pub mod program;
pub mod render;
pub mod compute;
