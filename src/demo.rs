//! Built-in flipbook so the player runs without any assets
//!
//! # Examples
//!
//! ```
//! use flipbook::demo::*;
//!
//! let frames = demo_sequence();
//! assert_eq!(frames.len(), DEMO_FRAME_COUNT);
//! ```

use crate::math::{hsv_to_rgb, shade, to_rgba8};
use crate::sequence::{rgba_len, FramePixels, FrameSequence, MAX_FRAME_DIMENSION};

pub const DEMO_FRAME_COUNT: usize = 5;
pub const DEMO_FPS: f64 = 0.2;
pub const DEMO_WIDTH: u32 = 640;
pub const DEMO_HEIGHT: u32 = 480;

const MARKER_SIZE: u32 = 32;
const MARKER_GAP: u32 = 16;

/// Five frames played at 0.2 fps, 25 seconds in total
pub fn demo_sequence() -> FrameSequence {
    generated_sequence(DEMO_FRAME_COUNT, DEMO_WIDTH, DEMO_HEIGHT)
}

/// `count` frames of `width`x`height` pixels
pub fn generated_sequence(count: usize, width: u32, height: u32) -> FrameSequence {
    FrameSequence::from_pixels((0..count).map(|i| demo_frame(i, count, width, height)))
}

/// One frame: a vertical gradient in the frame's hue with `index + 1`
/// white markers along the top edge
///
/// Each side is capped at [`MAX_FRAME_DIMENSION`].
pub fn demo_frame(index: usize, count: usize, width: u32, height: u32) -> FramePixels {
    let width = width.min(MAX_FRAME_DIMENSION);
    let height = height.min(MAX_FRAME_DIMENSION);
    let base = rainbow_gradient(count)(index);
    let mut rgba = Vec::with_capacity(rgba_len(width, height).unwrap_or_default());

    for y in 0..height {
        let factor = 1.0 - 0.6 * (y as f32 / height.max(1) as f32);
        let row = to_rgba8(shade(base, factor));
        for x in 0..width {
            if is_marker(x, y, index) {
                rgba.extend_from_slice(&[255, 255, 255, 255]);
            } else {
                rgba.extend_from_slice(&row);
            }
        }
    }

    FramePixels::new(width, height, rgba)
}

/// Generates a rainbow gradient across total items
pub fn rainbow_gradient(total: usize) -> impl Fn(usize) -> [f32; 3] {
    move |i| hsv_to_rgb(i as f32 / total.max(1) as f32, 0.8, 0.9)
}

fn is_marker(x: u32, y: u32, index: usize) -> bool {
    if y < MARKER_GAP || y >= MARKER_GAP + MARKER_SIZE || x < MARKER_GAP {
        return false;
    }
    let step = MARKER_SIZE + MARKER_GAP;
    let slot = (x - MARKER_GAP) / step;
    let within = (x - MARKER_GAP) % step;
    (slot as usize) <= index && within < MARKER_SIZE
}
