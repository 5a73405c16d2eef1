//! Headless rendering to a PNG sequence.
//!
//! Runs a [`Scene`] at a fixed 60 Hz step on a [`RasterCanvas`] and writes
//! each frame as `frame_00000.png`.

use crate::canvas::RasterCanvas;
use crate::config::SkyburstConfig;
use crate::error::ExportError;
use crate::input::Command;
use crate::scene::Scene;
use glam::Vec2;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Fixed step between exported frames.
pub const FRAME_STEP: Duration = Duration::from_nanos(16_666_667);

/// What to export.
#[derive(Clone, Debug)]
pub struct ExportSettings {
    /// Output directory; created if missing.
    pub dir: PathBuf,
    /// Number of frames.
    pub frames: u32,
    /// Surface width.
    pub width: u32,
    /// Surface height.
    pub height: u32,
    /// RNG seed for repeatable output.
    pub seed: u64,
}

impl ExportSettings {
    /// Defaults for a directory: 180 frames at the configured window size.
    pub fn new(dir: impl Into<PathBuf>, config: &SkyburstConfig) -> Self {
        Self {
            dir: dir.into(),
            frames: 180,
            width: config.window.width,
            height: config.window.height,
            seed: 0,
        }
    }
}

/// File name for frame `index`.
pub fn frame_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("frame_{index:05}.png"))
}

/// Render and write the frames. Returns the written paths.
///
/// A burst is fired at the center on the first frame so the sequence is
/// never empty; the burst timer adds more as simulated time passes.
pub fn export_frames(
    config: &SkyburstConfig,
    settings: &ExportSettings,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut canvas = RasterCanvas::new(settings.width, settings.height)?;
    let mut scene = Scene::new(config, settings.width, settings.height, settings.seed);
    std::fs::create_dir_all(&settings.dir)?;

    tracing::info!(
        dir = %settings.dir.display(),
        frames = settings.frames,
        width = settings.width,
        height = settings.height,
        "exporting"
    );

    scene.apply(Command::Burst(Vec2::new(
        settings.width as f32 * 0.5,
        settings.height as f32 * 0.5,
    )));

    let start = SystemTime::now();
    let mut paths = Vec::with_capacity(settings.frames as usize);
    for index in 0..settings.frames {
        let now = start + FRAME_STEP * index;
        scene.advance(FRAME_STEP, now);
        scene.frame(&mut canvas);

        let path = frame_path(&settings.dir, index);
        canvas.save_png(&path)?;
        paths.push(path);
    }

    tracing::info!(written = paths.len(), "export finished");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_path() {
        assert_eq!(
            frame_path(Path::new("out"), 7),
            Path::new("out").join("frame_00007.png")
        );
    }

    #[test]
    fn test_zero_size_export_fails_at_setup() {
        let config = SkyburstConfig::default();
        let mut settings = ExportSettings::new(std::env::temp_dir().join("skyburst_zero"), &config);
        settings.width = 0;
        assert!(matches!(
            export_frames(&config, &settings),
            Err(ExportError::Surface(_))
        ));
    }
}
