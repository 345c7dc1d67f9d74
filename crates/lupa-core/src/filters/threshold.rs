use ndarray::Array2;

use crate::frame::Frame;
use crate::params::{ThresholdParams, ThresholdPolarity};

/// Binary threshold followed by erosion then dilation with a 3x3
/// square kernel. Iteration counts of 0 are a no-op.
///
/// Input is grayscale; output is binary (0.0 / 1.0).
pub fn threshold_and_morphology(gray: &Frame, params: &ThresholdParams) -> Frame {
    let level = params.value as f32 / 255.0;

    let mut mask = match params.polarity {
        ThresholdPolarity::Binary => gray.data.mapv(|v| v > level),
        ThresholdPolarity::BinaryInverted => gray.data.mapv(|v| v <= level),
    };

    for _ in 0..params.erode_iterations {
        mask = erode(&mask);
    }
    for _ in 0..params.dilate_iterations {
        mask = dilate(&mask);
    }

    let data = mask.mapv(|m| if m { 1.0 } else { 0.0 });
    let mut out = Frame::new(data, gray.original_bit_depth);
    out.metadata = gray.metadata.clone();
    out
}

/// Binary erosion: a pixel stays true only if ALL pixels in its 3x3
/// neighborhood are true (out-of-bounds treated as false).
pub fn erode(mask: &Array2<bool>) -> Array2<bool> {
    let (h, w) = mask.dim();
    let mut result = Array2::from_elem((h, w), false);

    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }
            let mut all_true = true;
            'neighbors: for dr in -1..=1_i32 {
                for dc in -1..=1_i32 {
                    let nr = row as i32 + dr;
                    let nc = col as i32 + dc;
                    if nr < 0 || nr >= h as i32 || nc < 0 || nc >= w as i32 {
                        all_true = false;
                        break 'neighbors;
                    }
                    if !mask[[nr as usize, nc as usize]] {
                        all_true = false;
                        break 'neighbors;
                    }
                }
            }
            result[[row, col]] = all_true;
        }
    }

    result
}

/// Binary dilation: a pixel becomes true if ANY pixel in its 3x3
/// neighborhood is true.
pub fn dilate(mask: &Array2<bool>) -> Array2<bool> {
    let (h, w) = mask.dim();
    let mut result = Array2::from_elem((h, w), false);

    for row in 0..h {
        for col in 0..w {
            let mut any_true = false;
            'neighbors: for dr in -1..=1_i32 {
                for dc in -1..=1_i32 {
                    let nr = row as i32 + dr;
                    let nc = col as i32 + dc;
                    if nr >= 0
                        && nr < h as i32
                        && nc >= 0
                        && nc < w as i32
                        && mask[[nr as usize, nc as usize]]
                    {
                        any_true = true;
                        break 'neighbors;
                    }
                }
            }
            result[[row, col]] = any_true;
        }
    }

    result
}
