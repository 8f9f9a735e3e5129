// src/frame_io.rs

use anyhow::{anyhow, Result};
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

use crate::types::{Config, Frame};

const FRAME_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "bmp", "PNG", "JPG", "JPEG", "BMP"];

/// File-based frame source and sink for the driver binary.
pub struct FrameStore {
    config: Config,
}

impl FrameStore {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Discover captured frame images under the configured input directory,
    /// sorted by path for a stable processing order.
    pub fn find_frame_files(&self) -> Result<Vec<PathBuf>> {
        let mut frames = Vec::new();

        for entry in WalkDir::new(&self.config.io.input_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if let Some(ext) = path.extension() {
                if FRAME_EXTENSIONS.contains(&ext.to_str().unwrap_or("")) {
                    frames.push(path.to_path_buf());
                }
            }
        }

        frames.sort();
        info!("Found {} frame image(s)", frames.len());
        Ok(frames)
    }

    /// Decode one captured image into a raw RGB frame.
    pub fn load_frame(&self, path: &Path) -> Result<Frame> {
        let decoded = image::open(path)?.to_rgb8();
        let (width, height) = decoded.dimensions();
        Ok(Frame::rgb(decoded.into_raw(), width, height))
    }

    /// Write an annotated frame next to its source name in the output
    /// directory. Returns `None` when annotated output is disabled.
    pub fn save_annotated(&self, input_path: &Path, frame: &Frame) -> Result<Option<PathBuf>> {
        if !self.config.io.save_annotated {
            return Ok(None);
        }

        std::fs::create_dir_all(&self.config.io.output_dir)?;

        let stem = input_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("frame");
        let output_path =
            PathBuf::from(&self.config.io.output_dir).join(format!("{}_annotated.png", stem));

        let canvas = RgbImage::from_raw(frame.width, frame.height, frame.data.clone())
            .ok_or_else(|| anyhow!("annotated frame buffer does not match its dimensions"))?;
        canvas.save(&output_path)?;

        Ok(Some(output_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Config;

    #[test]
    fn test_save_annotated_respects_toggle() {
        let mut config = Config::default();
        config.io.save_annotated = false;
        let store = FrameStore::new(config);

        let frame = Frame::rgb(vec![0u8; 4 * 4 * 3], 4, 4);
        let saved = store.save_annotated(Path::new("frame_0001.png"), &frame).unwrap();
        assert!(saved.is_none());
    }

    #[test]
    fn test_find_frame_files_on_missing_dir_is_empty() {
        let mut config = Config::default();
        config.io.input_dir = "does-not-exist".to_string();
        let store = FrameStore::new(config);
        assert!(store.find_frame_files().unwrap().is_empty());
    }
}
