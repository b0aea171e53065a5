//! Named GPU programs.
//!
//! Renderers never embed shader source: they ask a [`ProgramProvider`] for a
//! program by name and get back a compiled module plus its entry point.
//! [`WgslLibrary`] is the stock provider; it parses and validates WGSL with
//! naga before wgpu ever sees it, so a broken shader is an `Err` at setup
//! instead of a panic inside the device.

mod error;
mod library;
mod provider;

pub use error::ProgramError;
pub use library::{names, ProgramSource, WgslLibrary};
pub use provider::{CompiledProgram, ProgramProvider, ProgramStage};
