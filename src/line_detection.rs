// src/line_detection.rs

use image::GrayImage;
use std::f64::consts::PI;

use crate::types::{BoundaryLine, BoundarySide, LineCandidate};

/// Minimum accumulator votes for a line candidate.
pub const VOTE_THRESHOLD: u32 = 100;

/// One accumulator bin per degree over [0, pi).
const THETA_BINS: usize = 180;

/// Display extrapolation distances along the line direction, tuned for the
/// 1280x720 working frame.
const NEAR_EXTRAPOLATION: f64 = 400.0;
const FAR_EXTRAPOLATION: f64 = 600.0;

/// Detect lane boundaries in an edge map: Hough candidates, side
/// classification by theta, and per-side median aggregation.
///
/// Either side may come back empty; that is a normal result, not an error.
pub fn detect_boundaries(edges: &GrayImage) -> (Option<BoundaryLine>, Option<BoundaryLine>) {
    let candidates = detect_line_candidates(edges);
    let (left, right) = classify_candidates(&candidates);
    (
        aggregate_side(&left, BoundarySide::Left),
        aggregate_side(&right, BoundarySide::Right),
    )
}

/// Hough transform over the edge map.
///
/// Theta resolution is one degree, rho resolution one pixel. A cell counts
/// as a candidate when it reaches [`VOTE_THRESHOLD`] votes and is a local
/// maximum over its four accumulator neighbours. Candidates are ordered by
/// descending votes.
pub fn detect_line_candidates(edges: &GrayImage) -> Vec<LineCandidate> {
    let (width, height) = edges.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let rho_max = (width as f64).hypot(height as f64).ceil() as i32;
    let rho_bins = (2 * rho_max + 1) as usize;

    let trig: Vec<(f64, f64)> = (0..THETA_BINS)
        .map(|t| {
            let theta = t as f64 * PI / 180.0;
            (theta.cos(), theta.sin())
        })
        .collect();

    // accumulator[theta bin][rho bin], rho shifted by rho_max
    let mut accumulator = vec![vec![0u32; rho_bins]; THETA_BINS];

    for (x, y, px) in edges.enumerate_pixels() {
        if px.0[0] == 0 {
            continue;
        }
        for (t, &(cos_t, sin_t)) in trig.iter().enumerate() {
            let rho = x as f64 * cos_t + y as f64 * sin_t;
            let r = (rho.round() as i32 + rho_max) as usize;
            accumulator[t][r] += 1;
        }
    }

    let mut peaks: Vec<(u32, usize, usize)> = Vec::new();
    for t in 0..THETA_BINS {
        for r in 0..rho_bins {
            let votes = accumulator[t][r];
            if votes < VOTE_THRESHOLD {
                continue;
            }
            // keep one cell per plateau
            if r > 0 && accumulator[t][r - 1] > votes {
                continue;
            }
            if r + 1 < rho_bins && accumulator[t][r + 1] >= votes {
                continue;
            }
            if t > 0 && accumulator[t - 1][r] > votes {
                continue;
            }
            if t + 1 < THETA_BINS && accumulator[t + 1][r] >= votes {
                continue;
            }
            peaks.push((votes, t, r));
        }
    }
    peaks.sort_by(|a, b| b.0.cmp(&a.0));

    peaks
        .into_iter()
        .map(|(_, t, r)| LineCandidate {
            rho: (r as i32 - rho_max) as f64,
            theta: t as f64 * PI / 180.0,
        })
        .collect()
}

/// Split candidates by side. Classification is a pure function of theta:
/// theta < pi/2 goes left, everything else (ties included) goes right.
pub fn classify_candidates(candidates: &[LineCandidate]) -> (Vec<LineCandidate>, Vec<LineCandidate>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for &candidate in candidates {
        if candidate.theta < PI / 2.0 {
            left.push(candidate);
        } else {
            right.push(candidate);
        }
    }
    (left, right)
}

/// Collapse one side's candidates into a single boundary via element-wise
/// median of rho and theta. Empty input yields no boundary.
pub fn aggregate_side(candidates: &[LineCandidate], side: BoundarySide) -> Option<BoundaryLine> {
    if candidates.is_empty() {
        return None;
    }
    let rho = median(candidates.iter().map(|c| c.rho).collect());
    let theta = median(candidates.iter().map(|c| c.theta).collect());
    Some(BoundaryLine {
        side,
        rho,
        theta,
        endpoints: endpoints(rho, theta),
    })
}

/// Median with interpolation: middle element for odd counts, mean of the
/// two middle elements for even counts.
fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

/// Normal-form to Cartesian display endpoints, integer-truncated.
fn endpoints(rho: f64, theta: f64) -> [(i32, i32); 2] {
    let a = theta.cos();
    let b = theta.sin();
    let x0 = a * rho;
    let y0 = b * rho;
    [
        (
            (x0 - NEAR_EXTRAPOLATION * b) as i32,
            (y0 + NEAR_EXTRAPOLATION * a) as i32,
        ),
        (
            (x0 + FAR_EXTRAPOLATION * b) as i32,
            (y0 - FAR_EXTRAPOLATION * a) as i32,
        ),
    ]
}
