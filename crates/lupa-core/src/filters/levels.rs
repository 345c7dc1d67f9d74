use crate::frame::Frame;

/// Linear brightness/contrast rescale: `out = clamp(in * contrast + brightness)`.
///
/// `brightness` is an additive offset in normalized units ([-1.0, 1.0]);
/// `contrast` is the multiplicative gain (1.0 = no change).
pub fn brightness_contrast(frame: &Frame, brightness: f32, contrast: f32) -> Frame {
    let data = frame.data.mapv(|v| (v * contrast + brightness).clamp(0.0, 1.0));
    let mut out = Frame::new(data, frame.original_bit_depth);
    out.metadata = frame.metadata.clone();
    out
}
