use ndarray::Array2;

use crate::frame::Frame;

/// High-pass Laplacian response: grayscale input, 3x3 Laplacian,
/// absolute value saturated back to [0, 1] (the 8-bit rescale step).
pub fn laplacian_sharpen(gray: &Frame) -> Frame {
    let (h, w) = gray.data.dim();
    let mut data = Array2::<f32>::zeros((h, w));

    for row in 0..h {
        for col in 0..w {
            let center = gray.data[[row, col]];
            let up = gray.data[[row.saturating_sub(1), col]];
            let down = gray.data[[(row + 1).min(h.saturating_sub(1)), col]];
            let left = gray.data[[row, col.saturating_sub(1)]];
            let right = gray.data[[row, (col + 1).min(w.saturating_sub(1))]];

            let lap = up + down + left + right - 4.0 * center;
            data[[row, col]] = lap.abs().min(1.0);
        }
    }

    let mut out = Frame::new(data, gray.original_bit_depth);
    out.metadata = gray.metadata.clone();
    out
}
