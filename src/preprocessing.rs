// src/preprocessing.rs

use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;

use crate::types::{Frame, WORKING_HEIGHT, WORKING_WIDTH};

/// Grayscale intensity at or above which a pixel counts as marking
/// foreground. Bright pixels are foreground; callers rely on this polarity.
pub const FOREGROUND_THRESHOLD: u8 = 90;

/// Dilation radius; a radius of 2 gives the 5x5 square structuring element.
const DILATE_RADIUS: u8 = 2;

/// Normalize a raw color frame into the binary marking mask at working
/// resolution: resize, grayscale, global threshold, one dilation pass.
///
/// Expects a validated 3-channel frame; always succeeds.
pub fn prepare(frame: &Frame) -> GrayImage {
    let resized = resize_bilinear(
        &frame.data,
        frame.width as usize,
        frame.height as usize,
        WORKING_WIDTH as usize,
        WORKING_HEIGHT as usize,
    );
    let mask = threshold_mask(&resized, WORKING_WIDTH, WORKING_HEIGHT);
    dilate(&mask, Norm::LInf, DILATE_RADIUS)
}

/// Bilinear resize of an interleaved RGB buffer.
fn resize_bilinear(src: &[u8], src_w: usize, src_h: usize, dst_w: usize, dst_h: usize) -> Vec<u8> {
    let mut dst = vec![0u8; dst_h * dst_w * 3];

    let x_ratio = src_w as f32 / dst_w as f32;
    let y_ratio = src_h as f32 / dst_h as f32;

    for dy in 0..dst_h {
        for dx in 0..dst_w {
            let sx = dx as f32 * x_ratio;
            let sy = dy as f32 * y_ratio;

            let sx0 = sx.floor() as usize;
            let sy0 = sy.floor() as usize;
            let sx1 = (sx0 + 1).min(src_w - 1);
            let sy1 = (sy0 + 1).min(src_h - 1);

            let fx = sx - sx0 as f32;
            let fy = sy - sy0 as f32;

            for c in 0..3 {
                let p00 = src[(sy0 * src_w + sx0) * 3 + c] as f32;
                let p10 = src[(sy0 * src_w + sx1) * 3 + c] as f32;
                let p01 = src[(sy1 * src_w + sx0) * 3 + c] as f32;
                let p11 = src[(sy1 * src_w + sx1) * 3 + c] as f32;

                let val = p00 * (1.0 - fx) * (1.0 - fy)
                    + p10 * fx * (1.0 - fy)
                    + p01 * (1.0 - fx) * fy
                    + p11 * fx * fy;

                dst[(dy * dst_w + dx) * 3 + c] = val.round() as u8;
            }
        }
    }

    dst
}

/// Grayscale (Rec.601 luma) plus global threshold in one pass.
fn threshold_mask(rgb: &[u8], width: u32, height: u32) -> GrayImage {
    let mut data = Vec::with_capacity((width * height) as usize);
    for px in rgb.chunks_exact(3) {
        let luma =
            (0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32).round() as u8;
        data.push(if luma >= FOREGROUND_THRESHOLD { 255 } else { 0 });
    }
    GrayImage::from_raw(width, height, data).expect("mask buffer matches dimensions")
}
