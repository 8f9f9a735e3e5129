// src/main.rs

mod config;
mod contour_location;
mod edge_detection;
mod error;
mod font;
mod frame_io;
mod line_detection;
mod overlay;
mod pipeline;
mod preprocessing;
mod steering;
mod types;

use anyhow::Result;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use types::{Config, Direction};

fn main() -> Result<()> {
    let (config, config_error) = match Config::load("config.yaml") {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("linetrack={}", config.logging.level).as_str())
        .init();

    info!("Floor-line steering pipeline starting");
    match config_error {
        None => info!("✓ Configuration loaded"),
        Some(e) => warn!("config.yaml not usable ({}); falling back to defaults", e),
    }

    let store = frame_io::FrameStore::new(config.clone());
    let frame_files = store.find_frame_files()?;

    if frame_files.is_empty() {
        error!("No frame images found in {}", config.io.input_dir);
        return Ok(());
    }

    info!("Found {} frame(s) to process", frame_files.len());

    let start_time = Instant::now();
    let mut stats = RunStats::default();

    for path in &frame_files {
        let frame = match store.load_frame(path) {
            Ok(frame) => frame,
            Err(e) => {
                error!("Failed to decode {}: {}", path.display(), e);
                stats.failed += 1;
                continue;
            }
        };

        match pipeline::process(&frame) {
            Ok(output) => {
                stats.record(output.direction);
                match output.direction {
                    Some(direction) => {
                        info!("{}: steer {}", path.display(), direction)
                    }
                    None => info!("{}: no marking detected", path.display()),
                }

                match store.save_annotated(path, &output.annotated) {
                    Ok(Some(saved)) => debug!("Annotated frame written to {}", saved.display()),
                    Ok(None) => {}
                    Err(e) => warn!("Failed to save annotated frame: {}", e),
                }
            }
            Err(e) => {
                error!("Frame {} failed: {}", path.display(), e);
                stats.failed += 1;
            }
        }
    }

    let duration = start_time.elapsed();
    let avg_fps = stats.total as f64 / duration.as_secs_f64().max(f64::EPSILON);

    info!("📊 Final Report:");
    info!("  Frames processed: {}", stats.total);
    info!("  ⬅️  Left: {}", stats.left);
    info!("  ⬆️  Forward: {}", stats.forward);
    info!("  ➡️  Right: {}", stats.right);
    info!("  No marking: {}", stats.undetected);
    if stats.failed > 0 {
        warn!("  Failed frames: {}", stats.failed);
    }
    info!("  Processing Speed: {:.1} FPS", avg_fps);

    Ok(())
}

#[derive(Default)]
struct RunStats {
    total: u64,
    left: u64,
    forward: u64,
    right: u64,
    undetected: u64,
    failed: u64,
}

impl RunStats {
    fn record(&mut self, direction: Option<Direction>) {
        self.total += 1;
        match direction {
            Some(Direction::Left) => self.left += 1,
            Some(Direction::Forward) => self.forward += 1,
            Some(Direction::Right) => self.right += 1,
            None => self.undetected += 1,
        }
    }
}
