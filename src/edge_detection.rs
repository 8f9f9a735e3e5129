// src/edge_detection.rs

use image::GrayImage;
use imageproc::edges::canny;

use crate::error::PipelineError;

/// Canny hysteresis thresholds.
pub const CANNY_LOW: f32 = 50.0;
pub const CANNY_HIGH: f32 = 150.0;

/// Convert the binary marking mask into an edge map.
///
/// A zero-sized mask is the only failure mode.
pub fn detect_edges(mask: &GrayImage) -> Result<GrayImage, PipelineError> {
    if mask.width() == 0 || mask.height() == 0 {
        return Err(PipelineError::InvalidFrame {
            width: mask.width(),
            height: mask.height(),
            channels: 1,
        });
    }
    Ok(canny(mask, CANNY_LOW, CANNY_HIGH))
}
