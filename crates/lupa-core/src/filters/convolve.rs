use ndarray::Array2;
use rayon::prelude::*;

/// Minimum pixel count (h*w) to justify row-level parallelism.
const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Separable 2-D convolution: one horizontal pass, one vertical pass,
/// clamp-to-edge borders.
pub fn convolve_separable(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let row_pass = convolve_axis(data, kernel, Axis::Rows);
    convolve_axis(&row_pass, kernel, Axis::Cols)
}

#[derive(Clone, Copy)]
enum Axis {
    Rows,
    Cols,
}

fn convolve_axis(data: &Array2<f32>, kernel: &[f32], axis: Axis) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() as isize / 2;

    let convolve_row = |row: usize| -> Vec<f32> {
        (0..w)
            .map(|col| {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let tap = ki as isize - radius;
                    let (sr, sc) = match axis {
                        Axis::Rows => (row as isize, (col as isize + tap).clamp(0, w as isize - 1)),
                        Axis::Cols => ((row as isize + tap).clamp(0, h as isize - 1), col as isize),
                    };
                    sum += data[[sr as usize, sc as usize]] * kv;
                }
                sum
            })
            .collect()
    };

    let rows: Vec<Vec<f32>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(convolve_row).collect()
    } else {
        (0..h).map(convolve_row).collect()
    };

    let mut result = Array2::<f32>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}
