// src/error.rs

use thiserror::Error;

/// Errors that cross the pipeline boundary.
///
/// Missing lines or contours are normal empty results and are never
/// reported through this type.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid frame: {width}x{height} with {channels} channel(s)")]
    InvalidFrame {
        width: u32,
        height: u32,
        channels: u32,
    },
}
