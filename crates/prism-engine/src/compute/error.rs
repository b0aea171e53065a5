use thiserror::Error;

use crate::program::ProgramError;

#[derive(Debug, Error)]
pub enum ComputeError {
    #[error(transparent)]
    Program(#[from] ProgramError),

    #[error("device poll failed: {0}")]
    Poll(#[from] wgpu::PollError),

    #[error("readback buffer could not be mapped: {0}")]
    Map(#[from] wgpu::BufferAsyncError),

    #[error("map callback was dropped before it reported")]
    Disconnected,

    #[error("input of {0} values exceeds the dispatch limit")]
    TooLarge(usize),
}
