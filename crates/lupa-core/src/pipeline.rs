//! Two-tier processing pipeline.
//!
//! The global tier runs cheap operations over every full frame; the
//! local tier runs the same stage order over only the ROI crop, so
//! per-frame cost is bounded by ROI area while a selection is active.
//! Both tiers start from the same zoomed raw base: the local result is
//! recomputed from source, never cropped out of the global output.

use ndarray::s;

use crate::filters::blur::{box_blur, gaussian_blur};
use crate::filters::edges::detect_edges;
use crate::filters::equalize::equalize_histogram;
use crate::filters::laplacian::laplacian_sharpen;
use crate::filters::levels::brightness_contrast;
use crate::filters::threshold::threshold_and_morphology;
use crate::filters::zoom::digital_zoom;
use crate::frame::{ColorFrame, Frame, ViewImage};
use crate::geometry::SourceRect;
use crate::params::{FilterKind, ProcessingParams};

/// Compute the zoomed base frame both tiers (and all ROI coordinate
/// math) operate against.
pub fn zoomed_base(source: &ColorFrame, zoom: f32) -> ColorFrame {
    digital_zoom(source, zoom)
}

/// Crop a color frame to a source-space ROI. Returns `None` when the
/// rect does not fit the frame (geometry mismatch) or is degenerate.
pub fn crop_color(image: &ColorFrame, roi: &SourceRect) -> Option<ColorFrame> {
    if !roi.fits(image.width(), image.height()) || roi.width() == 0 || roi.height() == 0 {
        return None;
    }
    let (y1, y2) = (roi.y1 as usize, roi.y2 as usize);
    let (x1, x2) = (roi.x1 as usize, roi.x2 as usize);
    Some(image.map_channels(|plane| {
        let data = plane.data.slice(s![y1..y2, x1..x2]).to_owned();
        let mut out = Frame::new(data, plane.original_bit_depth);
        out.metadata = plane.metadata.clone();
        out
    }))
}

/// Single dispatch point for the spatial filter selector.
fn apply_filter(view: ViewImage, kind: FilterKind) -> ViewImage {
    match kind {
        FilterKind::None => view,
        FilterKind::Grayscale => ViewImage::Mono(view.luminance()),
        FilterKind::BoxBlur => view.map_planes(box_blur),
        FilterKind::GaussianBlur => view.map_planes(gaussian_blur),
        FilterKind::LaplacianSharpen => ViewImage::Mono(laplacian_sharpen(&view.luminance())),
        FilterKind::EdgeDetect => ViewImage::Mono(detect_edges(&view.luminance())),
    }
}

/// Apply the fixed post-zoom stage order to an already-zoomed input:
/// histogram equalization, brightness/contrast, spatial filter, then
/// threshold + morphology (always last, always grayscale).
fn apply_stages(base: ColorFrame, params: &ProcessingParams) -> ViewImage {
    let mut view = if params.equalize {
        ViewImage::Mono(equalize_histogram(&base.luminance()))
    } else {
        ViewImage::Color(base)
    };

    view = view.map_planes(|plane| brightness_contrast(plane, params.brightness, params.contrast));
    view = apply_filter(view, params.filter);

    if params.threshold.active {
        view = ViewImage::Mono(threshold_and_morphology(&view.luminance(), &params.threshold));
    }

    view
}

/// Global tier: the full (already zoomed) base frame through all
/// post-zoom stages. An empty input yields `None`; the caller holds
/// the previous display.
pub fn apply_global(base: &ColorFrame, params: &ProcessingParams) -> Option<ViewImage> {
    if base.is_empty() {
        return None;
    }
    Some(apply_stages(base.clone(), params))
}

/// Local tier: crop the raw zoomed base to the ROI, then the same
/// post-zoom stages. Independent of whatever the global tier produced.
pub fn apply_local(
    base: &ColorFrame,
    roi: &SourceRect,
    params: &ProcessingParams,
) -> Option<ViewImage> {
    let crop = crop_color(base, roi)?;
    if crop.is_empty() {
        return None;
    }
    Some(apply_stages(crop, params))
}

/// One-shot convenience for batch use: zoom then global tier.
pub fn process_frame(source: &ColorFrame, params: &ProcessingParams) -> Option<ViewImage> {
    if source.is_empty() {
        return None;
    }
    apply_global(&zoomed_base(source, params.zoom), params)
}
