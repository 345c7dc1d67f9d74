//! Render sink: converts processed snapshots into display-ready RGB
//! buffers. Pure; never mutates the images it receives.

use crate::filters::zoom::resize_bilinear;
use crate::frame::ViewImage;

/// Packed 8-bit RGB display buffer, row-major.
#[derive(Clone, Debug)]
pub struct DisplayBuffer {
    pub width: usize,
    pub height: usize,
    pub rgb: Vec<u8>,
}

/// Convert a snapshot to packed RGB8, replicating grayscale to three
/// channels.
pub fn to_rgb8(view: &ViewImage) -> DisplayBuffer {
    let color = view.to_color();
    let (h, w) = (color.height(), color.width());
    let mut rgb = Vec::with_capacity(h * w * 3);

    for row in 0..h {
        for col in 0..w {
            rgb.push((color.red.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8);
            rgb.push((color.green.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8);
            rgb.push((color.blue.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8);
        }
    }

    DisplayBuffer {
        width: w,
        height: h,
        rgb,
    }
}

/// Largest size with the source aspect ratio that fits inside `target`.
pub fn fit_size(src: [usize; 2], target: [f32; 2]) -> [usize; 2] {
    if src[0] == 0 || src[1] == 0 || target[0] <= 0.0 || target[1] <= 0.0 {
        return [0, 0];
    }
    let scale = (target[0] / src[0] as f32).min(target[1] / src[1] as f32);
    [
        ((src[0] as f32 * scale) as usize).max(1),
        ((src[1] as f32 * scale) as usize).max(1),
    ]
}

/// Resize a snapshot to fit the target surface (aspect-preserving) and
/// pack it for display.
pub fn render_fitted(view: &ViewImage, target: [f32; 2]) -> Option<DisplayBuffer> {
    if view.is_empty() {
        return None;
    }
    let [out_w, out_h] = fit_size([view.width(), view.height()], target);
    if out_w == 0 || out_h == 0 {
        return None;
    }
    let resized = view.map_planes(|plane| {
        let mut out = crate::frame::Frame::new(
            resize_bilinear(&plane.data, out_h, out_w),
            plane.original_bit_depth,
        );
        out.metadata = plane.metadata.clone();
        out
    });
    Some(to_rgb8(&resized))
}
