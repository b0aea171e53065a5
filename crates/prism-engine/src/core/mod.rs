//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the applications built on it, plus the per-frame context through which an
//! application drives its [`FrameDriver`](crate::render::FrameDriver).

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
