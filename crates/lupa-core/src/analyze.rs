//! ROI intensity projection and peak detection.

use crate::frame::{ColorFrame, Frame, ViewImage};

/// Default minimum horizontal separation between reported peaks.
pub const DEFAULT_PEAK_MIN_DISTANCE: usize = 50;

/// Result of analyzing one ROI image.
#[derive(Clone, Debug)]
pub struct RoiAnalysis {
    /// ROI image with a full-height marker drawn at each peak column.
    pub annotated: ColorFrame,
    /// Per-column intensity sums of the grayscale ROI.
    pub profile: Vec<f32>,
    /// Column indices of detected peaks, in ascending order.
    pub peaks: Vec<usize>,
}

/// Column-sum projection: `profile[x] = Σ_y gray[y, x]`.
pub fn column_projection(gray: &Frame) -> Vec<f32> {
    let (h, w) = gray.data.dim();
    let mut profile = vec![0.0f32; w];
    for row in 0..h {
        for (col, slot) in profile.iter_mut().enumerate() {
            *slot += gray.data[[row, col]];
        }
    }
    profile
}

/// Find peaks in a 1-D profile.
///
/// A column is a peak iff it is a strict local maximum, its value is at
/// least the profile mean, and it lies at least `min_distance` columns
/// from every other reported peak. When two candidates are closer than
/// that, the higher-amplitude one wins; equal amplitudes keep the lower
/// index. Flat profiles report no peaks.
pub fn find_peaks(profile: &[f32], min_distance: usize) -> Vec<usize> {
    if profile.len() < 3 {
        return Vec::new();
    }

    let mean = profile.iter().sum::<f32>() / profile.len() as f32;

    let mut candidates: Vec<usize> = (1..profile.len() - 1)
        .filter(|&i| {
            profile[i] > profile[i - 1] && profile[i] > profile[i + 1] && profile[i] >= mean
        })
        .collect();

    // Greedy suppression, strongest first; ties resolved by index order
    // (stable sort keeps the lower index ahead).
    candidates.sort_by(|&a, &b| {
        profile[b]
            .partial_cmp(&profile[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut accepted: Vec<usize> = Vec::new();
    for i in candidates {
        if accepted
            .iter()
            .all(|&j| i.abs_diff(j) >= min_distance)
        {
            accepted.push(i);
        }
    }

    accepted.sort_unstable();
    accepted
}

/// Draw a full-height red marker at each peak column.
pub fn annotate_peaks(view: &ViewImage, peaks: &[usize]) -> ColorFrame {
    let mut color = view.to_color();
    let h = color.height();
    for &col in peaks {
        if col >= color.width() {
            continue;
        }
        for row in 0..h {
            color.red.data[[row, col]] = 1.0;
            color.green.data[[row, col]] = 0.0;
            color.blue.data[[row, col]] = 0.0;
        }
    }
    color
}

/// Full analysis of a processed ROI image: projection, peaks, and the
/// annotated display copy. Cheap enough to run on every pipeline tick.
///
/// Returns `None` for an empty ROI image.
pub fn analyze(view: &ViewImage, min_distance: usize) -> Option<RoiAnalysis> {
    if view.is_empty() {
        return None;
    }

    let gray = view.luminance();
    let profile = column_projection(&gray);
    let peaks = find_peaks(&profile, min_distance);
    let annotated = annotate_peaks(view, &peaks);

    Some(RoiAnalysis {
        annotated,
        profile,
        peaks,
    })
}
