// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "flipbook")]
#[command(about = "Flipbook player for still image sequences", long_about = None)]
pub struct Cli {
    /// Image files or directories of images, played in the given order
    pub frames: Vec<PathBuf>,

    /// Playback rate in frames per second
    #[arg(long)]
    pub fps: Option<f64>,

    /// JSON manifest describing the sequence
    #[arg(long, short = 'm')]
    pub manifest: Option<PathBuf>,

    /// Displayed frame width in points
    #[arg(long)]
    pub width: Option<u32>,

    /// Displayed frame height in points
    #[arg(long)]
    pub height: Option<u32>,

    /// Progress refresh cadence while playing, in milliseconds
    #[arg(long = "refresh-ms")]
    pub refresh_ms: Option<u64>,

    /// Play the built-in demo sequence, ignoring any frames given
    #[arg(long, default_value = "false")]
    pub demo: bool,
}
