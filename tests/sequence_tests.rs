use std::path::{Path, PathBuf};

use flipbook::sequence::{decode_frame, frame_files_in, FrameSource};
use flipbook::{FrameSequence, PlayerError};

fn write_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    img.save(path).unwrap();
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_png_keeps_dimensions_and_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    write_png(&path, 3, 2, [10, 20, 30, 255]);

    let pixels = decode_frame(&path).unwrap();
    assert_eq!((pixels.width, pixels.height), (3, 2));
    assert_eq!(pixels.rgba.len(), 3 * 2 * 4);
    assert_eq!(&pixels.rgba[0..4], &[10, 20, 30, 255]);
}

#[test]
fn test_decode_missing_file_is_io_error() {
    let err = decode_frame(Path::new("/no/such/dir/frame.png")).unwrap_err();
    assert!(matches!(err, PlayerError::Io { .. }));
}

#[test]
fn test_decode_garbage_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.png");
    std::fs::write(&path, b"definitely not a png").unwrap();

    let err = decode_frame(&path).unwrap_err();
    assert!(matches!(err, PlayerError::Decode { .. }));
}

// ============================================================================
// Sequences
// ============================================================================

#[test]
fn test_from_paths_keeps_order_and_marks_broken_frames() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("b.png");
    let broken = dir.path().join("broken.png");
    let last = dir.path().join("a.png");
    write_png(&first, 2, 2, [255, 0, 0, 255]);
    std::fs::write(&broken, b"nope").unwrap();
    write_png(&last, 2, 2, [0, 0, 255, 255]);

    let seq = FrameSequence::from_paths([&first, &broken, &last]);

    assert_eq!(seq.len(), 3);
    assert_eq!(seq.broken_count(), 1);
    assert!(seq.get(1).unwrap().is_broken());
    assert_eq!(seq.get(0).unwrap().source(), &FrameSource::File(first.clone()));
    assert_eq!(seq.get(2).unwrap().pixels().unwrap().rgba[2], 255);
    assert_eq!(seq.get(2).unwrap().label(), "Frame 3");
}

#[test]
fn test_directory_frames_sorted_by_name() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["frame3.png", "frame1.png", "frame2.png"] {
        write_png(&dir.path().join(name), 1, 1, [0, 0, 0, 255]);
    }
    std::fs::write(dir.path().join("README.txt"), "not a frame").unwrap();

    let files = frame_files_in(dir.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["frame1.png", "frame2.png", "frame3.png"]);

    let seq = FrameSequence::from_dir(dir.path()).unwrap();
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.broken_count(), 0);
}

#[test]
fn test_empty_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = FrameSequence::from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, PlayerError::EmptySequence));
}

#[test]
fn test_missing_directory_is_io_error() {
    let err = FrameSequence::from_dir(&PathBuf::from("/no/such/frames")).unwrap_err();
    assert!(matches!(err, PlayerError::Io { .. }));
}
