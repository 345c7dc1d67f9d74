use ndarray::Array2;

use crate::filters::blur::gaussian_blur;
use crate::frame::Frame;

/// Dual thresholds on the 8-bit gradient scale.
const WEAK_THRESHOLD: f32 = 100.0 / 255.0;
const STRONG_THRESHOLD: f32 = 200.0 / 255.0;

/// Edge detection: Gaussian smoothing, Sobel gradient magnitude, then
/// dual-threshold hysteresis. Weak edges survive only when 8-connected
/// to a strong edge. Output is binary (0.0 / 1.0).
pub fn detect_edges(gray: &Frame) -> Frame {
    let smoothed = gaussian_blur(gray);
    let (h, w) = smoothed.data.dim();
    if h == 0 || w == 0 {
        return gray.clone();
    }

    let magnitude = sobel_magnitude(&smoothed.data);

    // Hysteresis: flood out from strong pixels across weak ones.
    let mut edges = Array2::from_elem((h, w), false);
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for row in 0..h {
        for col in 0..w {
            if magnitude[[row, col]] >= STRONG_THRESHOLD {
                edges[[row, col]] = true;
                stack.push((row, col));
            }
        }
    }

    while let Some((row, col)) = stack.pop() {
        for dr in -1..=1_i32 {
            for dc in -1..=1_i32 {
                let nr = row as i32 + dr;
                let nc = col as i32 + dc;
                if nr < 0 || nr >= h as i32 || nc < 0 || nc >= w as i32 {
                    continue;
                }
                let (nr, nc) = (nr as usize, nc as usize);
                if !edges[[nr, nc]] && magnitude[[nr, nc]] >= WEAK_THRESHOLD {
                    edges[[nr, nc]] = true;
                    stack.push((nr, nc));
                }
            }
        }
    }

    let data = Array2::from_shape_fn((h, w), |(row, col)| {
        if edges[[row, col]] {
            1.0
        } else {
            0.0
        }
    });

    let mut out = Frame::new(data, gray.original_bit_depth);
    out.metadata = gray.metadata.clone();
    out
}

fn sobel_magnitude(data: &Array2<f32>) -> Array2<f32> {
    let (h, w) = data.dim();
    let at = |row: isize, col: isize| -> f32 {
        let r = row.clamp(0, h as isize - 1) as usize;
        let c = col.clamp(0, w as isize - 1) as usize;
        data[[r, c]]
    };

    Array2::from_shape_fn((h, w), |(row, col)| {
        let (r, c) = (row as isize, col as isize);

        let gx = -at(r - 1, c - 1) + at(r - 1, c + 1) - 2.0 * at(r, c - 1) + 2.0 * at(r, c + 1)
            - at(r + 1, c - 1)
            + at(r + 1, c + 1);
        let gy = -at(r - 1, c - 1) - 2.0 * at(r - 1, c) - at(r - 1, c + 1)
            + at(r + 1, c - 1)
            + 2.0 * at(r + 1, c)
            + at(r + 1, c + 1);

        (gx * gx + gy * gy).sqrt()
    })
}
