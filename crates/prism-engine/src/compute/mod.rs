//! Compute dispatch with CPU readback.

mod error;
mod multiplier;

pub use error::ComputeError;
pub use multiplier::{workgroup_count, BufferMultiplier, WORKGROUP_SIZE};
