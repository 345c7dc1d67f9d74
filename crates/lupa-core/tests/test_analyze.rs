use ndarray::Array2;

use lupa_core::analyze::{
    analyze, annotate_peaks, column_projection, find_peaks, DEFAULT_PEAK_MIN_DISTANCE,
};
use lupa_core::frame::{Frame, ViewImage};

fn triangle_profile(len: usize, peaks: &[(usize, f32)]) -> Vec<f32> {
    let mut profile = vec![0.0f32; len];
    for &(center, amplitude) in peaks {
        profile[center] = amplitude;
        if center > 0 {
            profile[center - 1] = profile[center - 1].max(amplitude / 2.0);
        }
        if center + 1 < len {
            profile[center + 1] = profile[center + 1].max(amplitude / 2.0);
        }
    }
    profile
}

// ---------------------------------------------------------------------------
// find_peaks
// ---------------------------------------------------------------------------

#[test]
fn test_flat_profile_has_no_peaks() {
    assert!(find_peaks(&vec![3.5; 400], DEFAULT_PEAK_MIN_DISTANCE).is_empty());
    assert!(find_peaks(&vec![0.0; 400], DEFAULT_PEAK_MIN_DISTANCE).is_empty());
}

#[test]
fn test_short_profile_has_no_peaks() {
    assert!(find_peaks(&[], 50).is_empty());
    assert!(find_peaks(&[1.0, 5.0], 50).is_empty());
}

#[test]
fn test_two_separated_peaks() {
    let profile = triangle_profile(300, &[(60, 10.0), (200, 8.0)]);
    assert_eq!(find_peaks(&profile, 50), vec![60, 200]);
}

#[test]
fn test_close_peaks_keep_the_stronger() {
    let profile = triangle_profile(300, &[(100, 5.0), (130, 9.0)]);
    assert_eq!(find_peaks(&profile, 50), vec![130]);
}

#[test]
fn test_equal_close_peaks_keep_lower_index() {
    let profile = triangle_profile(300, &[(100, 7.0), (130, 7.0)]);
    assert_eq!(find_peaks(&profile, 50), vec![100]);
}

#[test]
fn test_peaks_exactly_at_min_distance_both_survive() {
    let profile = triangle_profile(300, &[(100, 7.0), (150, 6.0)]);
    assert_eq!(find_peaks(&profile, 50), vec![100, 150]);
}

#[test]
fn test_sub_mean_bump_is_rejected() {
    // A tall plateau drags the mean above the small bump; the plateau
    // itself has no strict local maximum.
    let mut profile = vec![10.0f32; 100];
    profile.extend(vec![0.0f32; 100]);
    profile[150] = 2.0;
    assert!(find_peaks(&profile, 10).is_empty());
}

#[test]
fn test_endpoints_are_never_peaks() {
    let mut profile = vec![0.0f32; 100];
    profile[0] = 50.0;
    profile[99] = 50.0;
    profile[40] = 10.0;
    // Only the interior maximum qualifies; it still must clear the mean.
    let peaks = find_peaks(&profile, 10);
    assert!(!peaks.contains(&0));
    assert!(!peaks.contains(&99));
}

// ---------------------------------------------------------------------------
// Projection and annotation
// ---------------------------------------------------------------------------

#[test]
fn test_column_projection_sums_columns() {
    let data = Array2::from_shape_fn((4, 3), |(row, col)| (row + col) as f32);
    let profile = column_projection(&Frame::new(data, 8));
    // col 0: 0+1+2+3, col 1: 1+2+3+4, col 2: 2+3+4+5
    assert_eq!(profile, vec![6.0, 10.0, 14.0]);
}

#[test]
fn test_annotate_draws_red_columns() {
    let view = ViewImage::Mono(Frame::new(Array2::from_elem((6, 10), 0.5), 8));
    let annotated = annotate_peaks(&view, &[3, 7]);

    for row in 0..6 {
        assert_eq!(annotated.red.data[[row, 3]], 1.0);
        assert_eq!(annotated.green.data[[row, 3]], 0.0);
        assert_eq!(annotated.blue.data[[row, 3]], 0.0);
    }
    // Untouched columns keep the source intensity in all channels.
    assert_eq!(annotated.red.data[[0, 5]], 0.5);
    assert_eq!(annotated.green.data[[0, 5]], 0.5);
}

#[test]
fn test_annotate_ignores_out_of_range_columns() {
    let view = ViewImage::Mono(Frame::new(Array2::from_elem((4, 8), 0.2), 8));
    let annotated = annotate_peaks(&view, &[200]);
    assert_eq!(annotated.red.data[[0, 7]], 0.2);
}

// ---------------------------------------------------------------------------
// Full analysis
// ---------------------------------------------------------------------------

#[test]
fn test_analyze_detects_bright_column() {
    let data = Array2::from_shape_fn((20, 300), |(_, col)| {
        if col == 120 {
            1.0
        } else {
            0.05
        }
    });
    let view = ViewImage::Mono(Frame::new(data, 8));

    let analysis = analyze(&view, DEFAULT_PEAK_MIN_DISTANCE).expect("non-empty ROI");
    assert_eq!(analysis.peaks, vec![120]);
    assert_eq!(analysis.profile.len(), 300);
    assert!(analysis.profile[120] > analysis.profile[0]);
    assert_eq!(analysis.annotated.red.data[[10, 120]], 1.0);
    assert_eq!(analysis.annotated.green.data[[10, 120]], 0.0);
}

#[test]
fn test_analyze_empty_view_is_none() {
    let view = ViewImage::Mono(Frame::new(Array2::zeros((0, 0)), 8));
    assert!(analyze(&view, DEFAULT_PEAK_MIN_DISTANCE).is_none());
}

#[test]
fn test_analyze_flat_roi_reports_no_peaks() {
    let view = ViewImage::Mono(Frame::new(Array2::from_elem((10, 200), 0.4), 8));
    let analysis = analyze(&view, DEFAULT_PEAK_MIN_DISTANCE).expect("non-empty ROI");
    assert!(analysis.peaks.is_empty());
    assert!(analysis.profile.iter().all(|&v| (v - 4.0).abs() < 1e-4));
}
