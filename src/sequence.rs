//! Ordered, immutable frame sequences.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{PlayerError, PlayerResult};

/// File extensions picked up when a directory is expanded into frames
pub const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];

/// Largest frame or display side, wgpu's default 2D texture limit
pub const MAX_FRAME_DIMENSION: u32 = 8192;

/// Byte length of an RGBA8 buffer, `None` if it does not fit in `usize`
pub fn rgba_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(4)
}

/// Decoded frame pixels, RGBA8 unpremultiplied, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl FramePixels {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        debug_assert_eq!(Some(rgba.len()), rgba_len(width, height));
        Self {
            width,
            height,
            rgba,
        }
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSource {
    File(PathBuf),
    Generated,
}

/// One still image of a sequence; `pixels` is `None` for a broken image
#[derive(Debug, Clone)]
pub struct FrameImage {
    label: String,
    source: FrameSource,
    pixels: Option<Arc<FramePixels>>,
}

impl FrameImage {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn source(&self) -> &FrameSource {
        &self.source
    }

    pub fn pixels(&self) -> Option<&Arc<FramePixels>> {
        self.pixels.as_ref()
    }

    pub fn is_broken(&self) -> bool {
        self.pixels.is_none()
    }
}

/// Read and decode one image file
pub fn decode_frame(path: &Path) -> PlayerResult<FramePixels> {
    let bytes = std::fs::read(path).map_err(|e| PlayerError::io(path, e))?;
    let rgba = image::load_from_memory(&bytes)
        .map_err(|e| PlayerError::decode(path, e))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(FramePixels::new(width, height, rgba.into_raw()))
}

/// Image files directly inside `dir`, sorted by file name
pub fn frame_files_in(dir: &Path) -> PlayerResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| PlayerError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PlayerError::io(dir, e))?.path();
        if path.is_file() && has_frame_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_frame_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            FRAME_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn frame_label(index: usize) -> String {
    format!("Frame {}", index + 1)
}

/// Frames indexed `0..len`, never mutated after construction
#[derive(Debug, Clone, Default)]
pub struct FrameSequence {
    frames: Arc<[FrameImage]>,
}

impl FrameSequence {
    /// Load frames from files, in order
    ///
    /// A file that cannot be read or decoded becomes a broken frame; loading
    /// carries on with the rest.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let frames = paths
            .into_iter()
            .enumerate()
            .map(|(index, path)| {
                let path = path.as_ref();
                let pixels = match decode_frame(path) {
                    Ok(pixels) => Some(Arc::new(pixels)),
                    Err(e) => {
                        log::warn!("{}: {}", frame_label(index), e);
                        None
                    }
                };
                FrameImage {
                    label: frame_label(index),
                    source: FrameSource::File(path.to_path_buf()),
                    pixels,
                }
            })
            .collect();

        Self { frames }
    }

    /// Load every image in a directory, ordered by file name
    pub fn from_dir(dir: &Path) -> PlayerResult<Self> {
        let files = frame_files_in(dir)?;
        if files.is_empty() {
            return Err(PlayerError::EmptySequence);
        }
        Ok(Self::from_paths(files))
    }

    /// Build from already decoded frames
    pub fn from_pixels(images: impl IntoIterator<Item = FramePixels>) -> Self {
        let frames = images
            .into_iter()
            .enumerate()
            .map(|(index, pixels)| FrameImage {
                label: frame_label(index),
                source: FrameSource::Generated,
                pixels: Some(Arc::new(pixels)),
            })
            .collect();

        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FrameImage> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameImage> {
        self.frames.iter()
    }

    pub fn broken_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_broken()).count()
    }
}
