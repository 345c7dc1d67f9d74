use ndarray::Array2;

use lupa_core::frame::{ColorFrame, Frame};
use lupa_core::image_io::{load_color_image, save_color_png, save_gray_png};

#[test]
fn test_color_png_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.png");

    let red = Frame::new(Array2::from_elem((8, 12), 1.0), 8);
    let green = Frame::new(Array2::from_elem((8, 12), 0.5), 8);
    let blue = Frame::new(Array2::from_elem((8, 12), 0.0), 8);
    let color = ColorFrame { red, green, blue };

    save_color_png(&color, &path).unwrap();
    let loaded = load_color_image(&path).unwrap();

    assert_eq!(loaded.width(), 12);
    assert_eq!(loaded.height(), 8);
    assert!((loaded.red.data[[0, 0]] - 1.0).abs() < 0.01);
    assert!((loaded.green.data[[4, 6]] - 0.5).abs() < 0.01);
    assert!(loaded.blue.data[[7, 11]] < 0.01);
}

#[test]
fn test_gray_png_values_quantize_to_8_bit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gray.png");

    let data = Array2::from_shape_fn((4, 256), |(_, col)| col as f32 / 255.0);
    save_gray_png(&Frame::new(data, 8), &path).unwrap();

    let loaded = load_color_image(&path).unwrap();
    // Grayscale PNG loads with equal channels.
    assert!((loaded.red.data[[0, 128]] - loaded.green.data[[0, 128]]).abs() < 1e-6);
    assert!((loaded.red.data[[0, 255]] - 1.0).abs() < 0.01);
}

#[test]
fn test_load_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_color_image(&dir.path().join("nope.png")).is_err());
}
