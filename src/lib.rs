pub mod cli;
pub mod config;
pub mod core;
pub mod demo;
pub mod error;
pub mod math;
pub mod playback;
pub mod renderer;
pub mod sequence;
pub mod widget;

pub use error::{PlayerError, PlayerResult};
pub use playback::{FrameTiming, Playback, PlaybackPosition, PlaybackState};
pub use sequence::{FrameImage, FramePixels, FrameSequence};
pub use widget::FramePlayer;
