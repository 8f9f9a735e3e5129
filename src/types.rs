// src/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the working frame all geometric constants are tuned against.
pub const WORKING_WIDTH: u32 = 1280;
/// Height of the working frame.
pub const WORKING_HEIGHT: u32 = 720;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub io: IoConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IoConfig {
    pub input_dir: String,
    pub output_dir: String,
    pub save_annotated: bool,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input_dir: "frames".to_string(),
            output_dir: "output".to_string(),
            save_annotated: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// A raw interleaved pixel buffer. Color frames are 8-bit RGB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u32,
}

impl Frame {
    pub fn rgb(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            channels: 3,
        }
    }
}

/// A line in normal form: perpendicular distance from the origin and the
/// angle of that perpendicular.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCandidate {
    pub rho: f64,
    pub theta: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundarySide {
    Left,
    Right,
}

/// Aggregated lane boundary for one side, with display endpoints in
/// working-frame coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryLine {
    pub side: BoundarySide,
    pub rho: f64,
    pub theta: f64,
    pub endpoints: [(i32, i32); 2],
}

/// The contour selected as the current line marking, with its centroid in
/// working-frame coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenterTrack {
    pub points: Vec<(i32, i32)>,
    pub centroid: (i32, i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Left,
    Forward,
    Right,
}

impl Direction {
    /// Single-letter code used in the frame overlay.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Left => "L",
            Direction::Forward => "F",
            Direction::Right => "R",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "Left",
            Direction::Forward => "Forward",
            Direction::Right => "Right",
        };
        write!(f, "{}", name)
    }
}

/// Pure decision-path result for one frame; nothing here depends on
/// rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnalysis {
    pub left: Option<BoundaryLine>,
    pub right: Option<BoundaryLine>,
    pub track: Option<CenterTrack>,
    pub direction: Option<Direction>,
}

/// Final output of one pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub direction: Option<Direction>,
    pub annotated: Frame,
}
