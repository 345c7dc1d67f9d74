use crate::frame::Frame;

const HISTOGRAM_BINS: usize = 256;

/// Grayscale histogram equalization over 256 bins.
///
/// Maps intensities through the normalized cumulative distribution so
/// the output histogram is approximately flat. Forces single-channel
/// semantics; color callers equalize the luminance plane.
pub fn equalize_histogram(gray: &Frame) -> Frame {
    let n = gray.data.len();
    if n == 0 {
        return gray.clone();
    }

    let mut histogram = [0u64; HISTOGRAM_BINS];
    for &v in gray.data.iter() {
        let bin = ((v.clamp(0.0, 1.0) * (HISTOGRAM_BINS - 1) as f32) as usize)
            .min(HISTOGRAM_BINS - 1);
        histogram[bin] += 1;
    }

    let mut cdf = [0u64; HISTOGRAM_BINS];
    let mut running = 0u64;
    for (i, &count) in histogram.iter().enumerate() {
        running += count;
        cdf[i] = running;
    }

    // First non-zero CDF value; anchors the remap so the darkest
    // occupied bin maps to 0.
    let cdf_min = cdf
        .iter()
        .copied()
        .find(|&c| c > 0)
        .unwrap_or(0);

    let denom = (n as u64).saturating_sub(cdf_min);
    if denom == 0 {
        // Single occupied bin: equalization is undefined, keep as-is.
        return gray.clone();
    }

    let data = gray.data.mapv(|v| {
        let bin = ((v.clamp(0.0, 1.0) * (HISTOGRAM_BINS - 1) as f32) as usize)
            .min(HISTOGRAM_BINS - 1);
        (cdf[bin] - cdf_min) as f32 / denom as f32
    });

    let mut out = Frame::new(data, gray.original_bit_depth);
    out.metadata = gray.metadata.clone();
    out
}
