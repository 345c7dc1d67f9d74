use ndarray::{s, Array2};
use rayon::prelude::*;

use crate::frame::{ColorFrame, Frame};

/// Minimum output pixel count to justify row-level parallelism.
const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Bilinear resample to the given output shape.
pub fn resize_bilinear(data: &Array2<f32>, out_h: usize, out_w: usize) -> Array2<f32> {
    let (h, w) = data.dim();
    if h == 0 || w == 0 || out_h == 0 || out_w == 0 {
        return Array2::zeros((out_h, out_w));
    }

    let scale_y = h as f32 / out_h as f32;
    let scale_x = w as f32 / out_w as f32;

    let sample_row = |row: usize| -> Vec<f32> {
        let sy = ((row as f32 + 0.5) * scale_y - 0.5).clamp(0.0, h as f32 - 1.0);
        let y0 = sy.floor() as usize;
        let y1 = (y0 + 1).min(h - 1);
        let fy = sy - y0 as f32;

        (0..out_w)
            .map(|col| {
                let sx = ((col as f32 + 0.5) * scale_x - 0.5).clamp(0.0, w as f32 - 1.0);
                let x0 = sx.floor() as usize;
                let x1 = (x0 + 1).min(w - 1);
                let fx = sx - x0 as f32;

                let top = data[[y0, x0]] * (1.0 - fx) + data[[y0, x1]] * fx;
                let bottom = data[[y1, x0]] * (1.0 - fx) + data[[y1, x1]] * fx;
                top * (1.0 - fy) + bottom * fy
            })
            .collect()
    };

    let rows: Vec<Vec<f32>> = if out_h * out_w >= PARALLEL_PIXEL_THRESHOLD {
        (0..out_h).into_par_iter().map(sample_row).collect()
    } else {
        (0..out_h).map(sample_row).collect()
    };

    let mut result = Array2::<f32>::zeros((out_h, out_w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}

fn zoom_plane(frame: &Frame, factor: f32) -> Frame {
    let (h, w) = frame.data.dim();
    let crop_w = ((w as f32 / factor) as usize).max(1);
    let crop_h = ((h as f32 / factor) as usize).max(1);
    let x0 = (w - crop_w) / 2;
    let y0 = (h - crop_h) / 2;

    let cropped = frame.data.slice(s![y0..y0 + crop_h, x0..x0 + crop_w]);
    let resized = resize_bilinear(&cropped.to_owned(), h, w);

    let mut out = Frame::new(resized, frame.original_bit_depth);
    out.metadata = frame.metadata.clone();
    out
}

/// Digital zoom: crop the center region and rescale back to the
/// original dimensions. Factors <= 1.0 are the identity.
pub fn digital_zoom(image: &ColorFrame, factor: f32) -> ColorFrame {
    if factor <= 1.0 || image.is_empty() {
        return image.clone();
    }
    image.map_channels(|plane| zoom_plane(plane, factor))
}
