use std::path::PathBuf;

pub type PlayerResult<T> = Result<T, PlayerError>;

#[derive(thiserror::Error, Debug)]
pub enum PlayerError {
    #[error("frame rate must be a positive finite number, got {0}")]
    InvalidFrameRate(f64),

    #[error("refresh interval must be greater than zero")]
    InvalidRefreshInterval,

    #[error("display size must be between 1x1 and 8192x8192, got {width}x{height}")]
    InvalidDisplaySize { width: u32, height: u32 },

    #[error("frame sequence is empty")]
    EmptySequence,

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl PlayerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }
}
