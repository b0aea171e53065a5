//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) and its depth attachment
//! - acquiring frames and classifying surface errors

mod depth;
mod error;
mod frame;
mod gpu;
mod headless;
mod init;
mod surface;

pub use depth::DepthTarget;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use headless::request_headless;
#[cfg(test)]
pub(crate) use headless::test_device;
pub use init::GpuInit;
