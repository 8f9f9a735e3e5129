// src/overlay.rs
//
// Presentation-only drawing of the per-frame analysis onto a display copy
// of the original frame. Geometry is computed in the 1280x720 working
// space and scaled back to the source resolution here, so the annotated
// frame always matches the input dimensions.

use image::RgbImage;
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::font;
use crate::types::{
    BoundaryLine, BoundarySide, CenterTrack, Direction, Frame, FrameAnalysis, WORKING_HEIGHT,
    WORKING_WIDTH,
};

/// Overlay colors (RGB).
pub mod colors {
    use image::Rgb;

    pub const LEFT_BOUNDARY: Rgb<u8> = Rgb([255, 0, 0]);
    pub const RIGHT_BOUNDARY: Rgb<u8> = Rgb([0, 0, 255]);
    pub const TRACK: Rgb<u8> = Rgb([0, 255, 0]);
}

const CENTROID_MARKER_RADIUS: i32 = 5;
const LABEL_SCALE: i32 = 1;

/// Draw everything the analysis found onto a copy of the frame.
///
/// Absent elements are simply omitted; rendering never fails and never
/// feeds back into the decision path.
pub fn render(frame: &Frame, analysis: &FrameAnalysis) -> Frame {
    let mut canvas = RgbImage::from_raw(frame.width, frame.height, frame.data.clone())
        .expect("validated frame buffer matches dimensions");

    let sx = frame.width as f32 / WORKING_WIDTH as f32;
    let sy = frame.height as f32 / WORKING_HEIGHT as f32;

    if let Some(line) = &analysis.left {
        draw_boundary(&mut canvas, line, sx, sy);
    }
    if let Some(line) = &analysis.right {
        draw_boundary(&mut canvas, line, sx, sy);
    }
    if let Some(track) = &analysis.track {
        draw_track(&mut canvas, track, analysis.direction, sx, sy);
    }

    Frame::rgb(canvas.into_raw(), frame.width, frame.height)
}

fn draw_boundary(canvas: &mut RgbImage, line: &BoundaryLine, sx: f32, sy: f32) {
    let (color, label) = match line.side {
        BoundarySide::Left => (colors::LEFT_BOUNDARY, "Left line"),
        BoundarySide::Right => (colors::RIGHT_BOUNDARY, "Right line"),
    };

    let start = scale_point(line.endpoints[0], sx, sy);
    let end = scale_point(line.endpoints[1], sx, sy);
    draw_line_segment_mut(
        canvas,
        (start.0 as f32, start.1 as f32),
        (end.0 as f32, end.1 as f32),
        color,
    );
    font::draw_text(canvas, label, end.0, end.1, LABEL_SCALE, color);
}

fn draw_track(
    canvas: &mut RgbImage,
    track: &CenterTrack,
    direction: Option<Direction>,
    sx: f32,
    sy: f32,
) {
    for &point in &track.points {
        let (px, py) = scale_point(point, sx, sy);
        if px >= 0 && py >= 0 && (px as u32) < canvas.width() && (py as u32) < canvas.height() {
            canvas.put_pixel(px as u32, py as u32, colors::TRACK);
        }
    }

    let (cx, cy) = scale_point(track.centroid, sx, sy);
    draw_filled_circle_mut(canvas, (cx, cy), CENTROID_MARKER_RADIUS, colors::TRACK);

    if let Some(direction) = direction {
        let label = format!("direction:{}", direction.label());
        font::draw_text(canvas, &label, cx, cy, LABEL_SCALE, colors::TRACK);
    }
}

fn scale_point(point: (i32, i32), sx: f32, sy: f32) -> (i32, i32) {
    ((point.0 as f32 * sx) as i32, (point.1 as f32 * sy) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_frame(width: u32, height: u32) -> Frame {
        Frame::rgb(vec![0u8; (width * height * 3) as usize], width, height)
    }

    fn empty_analysis() -> FrameAnalysis {
        FrameAnalysis {
            left: None,
            right: None,
            track: None,
            direction: None,
        }
    }

    #[test]
    fn test_empty_analysis_leaves_frame_untouched() {
        let frame = blank_frame(WORKING_WIDTH, WORKING_HEIGHT);
        let annotated = render(&frame, &empty_analysis());
        assert_eq!(annotated, frame);
    }

    #[test]
    fn test_track_draws_centroid_marker_and_label() {
        let frame = blank_frame(WORKING_WIDTH, WORKING_HEIGHT);
        let mut analysis = empty_analysis();
        analysis.track = Some(CenterTrack {
            points: vec![(600, 300), (700, 300), (700, 400), (600, 400)],
            centroid: (650, 350),
        });
        analysis.direction = Some(Direction::Forward);

        let annotated = render(&frame, &analysis);
        let canvas =
            RgbImage::from_raw(annotated.width, annotated.height, annotated.data).unwrap();
        assert_eq!(canvas.get_pixel(650, 350).0, [0, 255, 0]);
        assert_eq!(canvas.get_pixel(600, 300).0, [0, 255, 0]);
    }

    #[test]
    fn test_boundary_with_offscreen_endpoint_is_clipped() {
        let frame = blank_frame(WORKING_WIDTH, WORKING_HEIGHT);
        let mut analysis = empty_analysis();
        analysis.left = Some(BoundaryLine {
            side: BoundarySide::Left,
            rho: 640.0,
            theta: 0.0,
            endpoints: [(640, 400), (640, -600)],
        });

        let annotated = render(&frame, &analysis);
        let canvas =
            RgbImage::from_raw(annotated.width, annotated.height, annotated.data).unwrap();
        // the on-screen part of the column is drawn in the left color
        assert_eq!(canvas.get_pixel(640, 200).0, [255, 0, 0]);
    }

    #[test]
    fn test_overlay_scales_to_source_resolution() {
        // at half working resolution the centroid marker lands at half the
        // working coordinates
        let frame = blank_frame(WORKING_WIDTH / 2, WORKING_HEIGHT / 2);
        let mut analysis = empty_analysis();
        analysis.track = Some(CenterTrack {
            points: vec![(640, 360)],
            centroid: (640, 360),
        });
        analysis.direction = Some(Direction::Forward);

        let annotated = render(&frame, &analysis);
        assert_eq!((annotated.width, annotated.height), (640, 360));
        let canvas =
            RgbImage::from_raw(annotated.width, annotated.height, annotated.data).unwrap();
        assert_eq!(canvas.get_pixel(320, 180).0, [0, 255, 0]);
    }
}
