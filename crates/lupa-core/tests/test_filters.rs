use approx::assert_relative_eq;
use ndarray::Array2;

use lupa_core::filters::blur::{box_blur, gaussian_blur};
use lupa_core::filters::edges::detect_edges;
use lupa_core::filters::equalize::equalize_histogram;
use lupa_core::filters::laplacian::laplacian_sharpen;
use lupa_core::filters::levels::brightness_contrast;
use lupa_core::filters::threshold::{dilate, erode, threshold_and_morphology};
use lupa_core::frame::Frame;
use lupa_core::params::{ThresholdParams, ThresholdPolarity};

fn solid(h: usize, w: usize, value: f32) -> Frame {
    Frame::new(Array2::from_elem((h, w), value), 8)
}

// ---------------------------------------------------------------------------
// Brightness / contrast
// ---------------------------------------------------------------------------

#[test]
fn test_brightness_contrast_formula() {
    let frame = solid(4, 4, 0.4);
    let out = brightness_contrast(&frame, 0.1, 2.0);
    // 0.4 * 2.0 + 0.1 = 0.9
    assert_relative_eq!(out.data[[0, 0]], 0.9, epsilon = 1e-6);
}

#[test]
fn test_brightness_contrast_saturates() {
    let frame = solid(4, 4, 0.8);
    let high = brightness_contrast(&frame, 0.5, 2.0);
    assert_eq!(high.data[[2, 2]], 1.0);

    let low = brightness_contrast(&frame, -2.0, 1.0);
    assert_eq!(low.data[[2, 2]], 0.0);
}

#[test]
fn test_neutral_levels_are_identity() {
    let data = Array2::from_shape_fn((8, 8), |(r, c)| (r * 8 + c) as f32 / 64.0);
    let frame = Frame::new(data, 8);
    let out = brightness_contrast(&frame, 0.0, 1.0);
    for (a, b) in frame.data.iter().zip(out.data.iter()) {
        assert_eq!(a, b);
    }
}

// ---------------------------------------------------------------------------
// Histogram equalization
// ---------------------------------------------------------------------------

#[test]
fn test_equalize_stretches_two_level_image() {
    // Half at 0.2, half at 0.8: equalization pushes them to 0 and 1.
    let mut data = Array2::from_elem((10, 10), 0.2f32);
    for row in 0..5 {
        for col in 0..10 {
            data[[row, col]] = 0.8;
        }
    }
    let out = equalize_histogram(&Frame::new(data, 8));
    assert_relative_eq!(out.data[[9, 0]], 0.0, epsilon = 1e-6);
    assert_relative_eq!(out.data[[0, 0]], 1.0, epsilon = 1e-6);
}

#[test]
fn test_equalize_uniform_image_is_unchanged() {
    let frame = solid(6, 6, 0.37);
    let out = equalize_histogram(&frame);
    for v in out.data.iter() {
        assert_relative_eq!(*v, 0.37, epsilon = 1e-6);
    }
}

#[test]
fn test_equalize_preserves_ordering() {
    let data = Array2::from_shape_fn((16, 16), |(r, c)| (r * 16 + c) as f32 / 255.0);
    let out = equalize_histogram(&Frame::new(data.clone(), 8));
    let flat_in: Vec<f32> = data.iter().copied().collect();
    let flat_out: Vec<f32> = out.data.iter().copied().collect();
    for window in flat_in.windows(2).zip(flat_out.windows(2)) {
        let (i, o) = window;
        if i[0] < i[1] {
            assert!(o[0] <= o[1], "equalization must be monotone");
        }
    }
}

// ---------------------------------------------------------------------------
// Blur
// ---------------------------------------------------------------------------

#[test]
fn test_blur_keeps_constant_image() {
    // Clamp-to-edge boundary handling means a constant image is a
    // fixed point of both blurs.
    let frame = solid(12, 12, 0.6);
    for out in [box_blur(&frame), gaussian_blur(&frame)] {
        for v in out.data.iter() {
            assert_relative_eq!(*v, 0.6, epsilon = 1e-5);
        }
    }
}

#[test]
fn test_blur_reduces_peak() {
    let mut data = Array2::<f32>::zeros((15, 15));
    data[[7, 7]] = 1.0;
    let frame = Frame::new(data, 8);

    let boxed = box_blur(&frame);
    let gauss = gaussian_blur(&frame);
    assert!(boxed.data[[7, 7]] < 1.0);
    assert!(gauss.data[[7, 7]] < 1.0);
    // Energy spreads onto neighbors.
    assert!(gauss.data[[7, 8]] > 0.0);
    assert!(boxed.data[[7, 10]] > 0.0);
}

// ---------------------------------------------------------------------------
// Laplacian
// ---------------------------------------------------------------------------

#[test]
fn test_laplacian_zero_on_flat_image() {
    let out = laplacian_sharpen(&solid(9, 9, 0.5));
    for v in out.data.iter() {
        assert_eq!(*v, 0.0);
    }
}

#[test]
fn test_laplacian_responds_to_point() {
    let mut data = Array2::<f32>::zeros((9, 9));
    data[[4, 4]] = 0.2;
    let out = laplacian_sharpen(&Frame::new(data, 8));
    // |0 + 0 + 0 + 0 - 4 * 0.2| = 0.8 at the point itself.
    assert_relative_eq!(out.data[[4, 4]], 0.8, epsilon = 1e-6);
    // Cross neighbors see the point once.
    assert_relative_eq!(out.data[[4, 5]], 0.2, epsilon = 1e-6);
    // Diagonals are outside the cross kernel.
    assert_eq!(out.data[[5, 5]], 0.0);
}

// ---------------------------------------------------------------------------
// Edge detection
// ---------------------------------------------------------------------------

#[test]
fn test_edges_empty_on_flat_image() {
    let out = detect_edges(&solid(20, 20, 0.5));
    assert!(out.data.iter().all(|&v| v == 0.0));
}

#[test]
fn test_edges_finds_step_boundary() {
    // Vertical step from 0 to 1 at column 10.
    let data = Array2::from_shape_fn((20, 20), |(_, col)| if col < 10 { 0.0 } else { 1.0 });
    let out = detect_edges(&Frame::new(data, 8));

    // Binary output.
    assert!(out.data.iter().all(|&v| v == 0.0 || v == 1.0));

    // Edge pixels concentrate around the boundary, none far from it.
    let near: f32 = (0..20).map(|row| out.data[[row, 10]]).sum();
    assert!(near > 0.0, "no edge response at the step");
    for row in 0..20 {
        assert_eq!(out.data[[row, 2]], 0.0);
        assert_eq!(out.data[[row, 17]], 0.0);
    }
}

// ---------------------------------------------------------------------------
// Threshold + morphology
// ---------------------------------------------------------------------------

#[test]
fn test_threshold_binary_polarity() {
    let data = Array2::from_shape_fn((1, 4), |(_, col)| col as f32 * 0.3);
    let frame = Frame::new(data, 8);
    let params = ThresholdParams {
        active: true,
        value: 127, // 0.498 normalized
        ..Default::default()
    };

    let out = threshold_and_morphology(&frame, &params);
    assert_eq!(out.data[[0, 0]], 0.0); // 0.0
    assert_eq!(out.data[[0, 1]], 0.0); // 0.3
    assert_eq!(out.data[[0, 2]], 1.0); // 0.6
    assert_eq!(out.data[[0, 3]], 1.0); // 0.9
}

#[test]
fn test_threshold_inverted_polarity() {
    let data = Array2::from_shape_fn((1, 4), |(_, col)| col as f32 * 0.3);
    let frame = Frame::new(data, 8);
    let params = ThresholdParams {
        active: true,
        value: 127,
        polarity: ThresholdPolarity::BinaryInverted,
        ..Default::default()
    };

    let out = threshold_and_morphology(&frame, &params);
    assert_eq!(out.data[[0, 0]], 1.0);
    assert_eq!(out.data[[0, 3]], 0.0);
}

#[test]
fn test_erode_shrinks_block_to_center() {
    let mut mask = Array2::from_elem((9, 9), false);
    for row in 3..6 {
        for col in 3..6 {
            mask[[row, col]] = true;
        }
    }
    let out = erode(&mask);
    assert!(out[[4, 4]]);
    assert_eq!(out.iter().filter(|v| **v).count(), 1);
}

#[test]
fn test_dilate_grows_single_pixel() {
    let mut mask = Array2::from_elem((9, 9), false);
    mask[[4, 4]] = true;
    let out = dilate(&mask);
    assert_eq!(out.iter().filter(|v| **v).count(), 9);
    for row in 3..6 {
        for col in 3..6 {
            assert!(out[[row, col]]);
        }
    }
}

#[test]
fn test_erode_removes_speckle_through_pipeline() {
    // One bright pixel below the surrounding block size survives the
    // threshold but not a single erosion pass.
    let mut data = Array2::<f32>::zeros((9, 9));
    data[[4, 4]] = 1.0;
    let frame = Frame::new(data, 8);
    let params = ThresholdParams {
        active: true,
        value: 127,
        erode_iterations: 1,
        ..Default::default()
    };

    let out = threshold_and_morphology(&frame, &params);
    assert!(out.data.iter().all(|&v| v == 0.0));
}

#[test]
fn test_zero_iterations_skip_morphology() {
    let mut data = Array2::<f32>::zeros((9, 9));
    data[[4, 4]] = 1.0;
    let frame = Frame::new(data, 8);
    let params = ThresholdParams {
        active: true,
        value: 127,
        ..Default::default()
    };

    let out = threshold_and_morphology(&frame, &params);
    assert_eq!(out.data[[4, 4]], 1.0);
    assert_eq!(out.data.iter().filter(|&&v| v == 1.0).count(), 1);
}
