use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::demo;
use crate::error::{PlayerError, PlayerResult};
use crate::sequence::{frame_files_in, FrameSequence, MAX_FRAME_DIMENSION};

/// Player configuration, read from a JSON manifest and/or the command line
///
/// ```json
/// { "frames": ["frame1.jpeg", "frame2.jpg"], "fps": 0.2, "width": 640, "height": 480 }
/// ```
///
/// Missing fields take their defaults. An empty frame list plays the demo
/// sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub title: String,
    pub frames: Vec<PathBuf>,
    pub fps: f64,
    pub width: u32,
    pub height: u32,
    pub refresh_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            title: "Flipbook".to_string(),
            frames: Vec::new(),
            fps: demo::DEMO_FPS,
            width: demo::DEMO_WIDTH,
            height: demo::DEMO_HEIGHT,
            refresh_ms: 100,
        }
    }
}

impl PlayerConfig {
    pub fn from_json(json: &str) -> PlayerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a manifest; relative frame paths resolve against its directory
    pub fn load(path: &Path) -> PlayerResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| PlayerError::io(path, e))?;
        let mut config = Self::from_json(&json)?;

        if let Some(base) = path.parent() {
            for frame in &mut config.frames {
                if frame.is_relative() {
                    *frame = base.join(&*frame);
                }
            }
        }
        Ok(config)
    }

    /// Manifest (if any) with command-line flags applied on top, validated
    pub fn from_cli(cli: &Cli) -> PlayerResult<Self> {
        let mut config = match &cli.manifest {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if cli.demo {
            self.frames.clear();
        } else if !cli.frames.is_empty() {
            self.frames = cli.frames.clone();
        }
        if let Some(fps) = cli.fps {
            self.fps = fps;
        }
        if let Some(width) = cli.width {
            self.width = width;
        }
        if let Some(height) = cli.height {
            self.height = height;
        }
        if let Some(refresh_ms) = cli.refresh_ms {
            self.refresh_ms = refresh_ms;
        }
    }

    pub fn validate(&self) -> PlayerResult<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 || !(1000.0 / self.fps).is_finite() {
            return Err(PlayerError::InvalidFrameRate(self.fps));
        }
        let dimensions = 1..=MAX_FRAME_DIMENSION;
        if !dimensions.contains(&self.width) || !dimensions.contains(&self.height) {
            return Err(PlayerError::InvalidDisplaySize {
                width: self.width,
                height: self.height,
            });
        }
        if self.refresh_ms == 0 {
            return Err(PlayerError::InvalidRefreshInterval);
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }

    pub fn uses_demo(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame files in play order, with directories expanded
    pub fn frame_paths(&self) -> PlayerResult<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in &self.frames {
            if entry.is_dir() {
                paths.extend(frame_files_in(entry)?);
            } else {
                paths.push(entry.clone());
            }
        }
        Ok(paths)
    }

    pub fn load_sequence(&self) -> PlayerResult<FrameSequence> {
        if self.uses_demo() {
            log::info!("no frames given, playing the demo sequence");
            return Ok(demo::generated_sequence(
                demo::DEMO_FRAME_COUNT,
                self.width,
                self.height,
            ));
        }

        let paths = self.frame_paths()?;
        if paths.is_empty() {
            return Err(PlayerError::EmptySequence);
        }
        Ok(FrameSequence::from_paths(paths))
    }
}
