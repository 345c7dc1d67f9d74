use crate::filters::convolve_separable;
use crate::frame::Frame;

/// 1/16 * [1, 4, 6, 4, 1]: separable form of the fixed 5x5 Gaussian.
const GAUSSIAN_KERNEL_5: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Low-pass averaging blur with a fixed 7x7 kernel.
pub fn box_blur(frame: &Frame) -> Frame {
    let kernel = [1.0f32 / 7.0; 7];
    let data = convolve_separable(&frame.data, &kernel);
    let mut out = Frame::new(data, frame.original_bit_depth);
    out.metadata = frame.metadata.clone();
    out
}

/// Fixed 5x5 Gaussian blur.
pub fn gaussian_blur(frame: &Frame) -> Frame {
    let data = convolve_separable(&frame.data, &GAUSSIAN_KERNEL_5);
    let mut out = Frame::new(data, frame.original_bit_depth);
    out.metadata = frame.metadata.clone();
    out
}
