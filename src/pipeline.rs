// src/pipeline.rs
//
// Per-frame orchestration. `analyze` is the pure decision path; `process`
// adds the overlay rendering on top. Neither holds any state across
// invocations, so repeated calls on the same frame are identical.

use tracing::debug;

use crate::contour_location;
use crate::edge_detection;
use crate::error::PipelineError;
use crate::line_detection;
use crate::overlay;
use crate::preprocessing;
use crate::steering;
use crate::types::{Frame, FrameAnalysis, FrameOutput};

/// Run the decision path on one frame: preprocessing, edge and line
/// detection, contour location, direction classification. No drawing.
pub fn analyze(frame: &Frame) -> Result<FrameAnalysis, PipelineError> {
    validate(frame)?;

    let mask = preprocessing::prepare(frame);
    let edges = edge_detection::detect_edges(&mask)?;
    let (left, right) = line_detection::detect_boundaries(&edges);
    let track = contour_location::locate_center_track(&mask);
    let direction = track
        .as_ref()
        .map(|t| steering::classify_direction(t.centroid.0));

    if let Some(line) = &left {
        debug!(rho = line.rho, theta = line.theta, "left boundary");
    }
    if let Some(line) = &right {
        debug!(rho = line.rho, theta = line.theta, "right boundary");
    }
    debug!(
        track = track.is_some(),
        direction = ?direction,
        "frame analyzed"
    );

    Ok(FrameAnalysis {
        left,
        right,
        track,
        direction,
    })
}

/// Full pipeline: analyze, then draw the overlay onto a copy of the input.
///
/// Validation happens before any drawing, so a rejected frame never yields
/// a partially annotated output.
pub fn process(frame: &Frame) -> Result<FrameOutput, PipelineError> {
    let analysis = analyze(frame)?;
    let annotated = overlay::render(frame, &analysis);
    Ok(FrameOutput {
        direction: analysis.direction,
        annotated,
    })
}

fn validate(frame: &Frame) -> Result<(), PipelineError> {
    let expected = frame.width as usize * frame.height as usize * frame.channels as usize;
    if frame.width == 0
        || frame.height == 0
        || frame.channels != 3
        || frame.data.len() != expected
    {
        return Err(PipelineError::InvalidFrame {
            width: frame.width,
            height: frame.height,
            channels: frame.channels,
        });
    }
    Ok(())
}
