use serde::{Deserialize, Serialize};

/// Spatial filter selector.
///
/// A closed enumeration resolved through a single dispatch point
/// (`pipeline::apply_filter`), so a missing arm is a compile error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    #[default]
    None,
    /// Single-channel conversion, replicated to 3 for display.
    Grayscale,
    /// Low-pass 7x7 averaging blur.
    BoxBlur,
    /// High-pass Laplacian rescaled to 8-bit range.
    LaplacianSharpen,
    /// Fixed 5x5 Gaussian blur.
    GaussianBlur,
    /// Edge detection with fixed dual thresholds.
    EdgeDetect,
}

impl FilterKind {
    pub const ALL: &'static [FilterKind] = &[
        FilterKind::None,
        FilterKind::Grayscale,
        FilterKind::BoxBlur,
        FilterKind::LaplacianSharpen,
        FilterKind::GaussianBlur,
        FilterKind::EdgeDetect,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::None => "None",
            FilterKind::Grayscale => "Grayscale",
            FilterKind::BoxBlur => "Low-pass (Averaging)",
            FilterKind::LaplacianSharpen => "High-pass (Laplacian)",
            FilterKind::GaussianBlur => "Gaussian Blur",
            FilterKind::EdgeDetect => "Edge Detection",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdPolarity {
    /// Pixels above the threshold become foreground.
    #[default]
    Binary,
    /// Pixels at or below the threshold become foreground.
    BinaryInverted,
}

/// Binary threshold + morphology stage parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdParams {
    pub active: bool,
    /// Threshold level on the 8-bit scale (0-255).
    pub value: u8,
    pub polarity: ThresholdPolarity,
    /// Erosion iterations applied after thresholding (0 = no-op).
    pub erode_iterations: usize,
    /// Dilation iterations applied after erosion (0 = no-op).
    pub dilate_iterations: usize,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            active: false,
            value: 127,
            polarity: ThresholdPolarity::default(),
            erode_iterations: 0,
            dilate_iterations: 0,
        }
    }
}

/// Immutable snapshot of all processing parameters.
///
/// Created by the control layer on every slider/toggle event and
/// consumed read-only by the pipeline; replacing the snapshot is the
/// only way parameters change.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingParams {
    /// Additive brightness offset in normalized units ([-1.0, 1.0]).
    pub brightness: f32,
    /// Multiplicative contrast factor (>= 0, 1.0 = no change).
    pub contrast: f32,
    /// Grayscale histogram equalization.
    pub equalize: bool,
    pub filter: FilterKind,
    /// Digital zoom factor (>= 1.0, 1.0 = no zoom).
    pub zoom: f32,
    pub threshold: ThresholdParams,
    /// Bumped by every control event; lets consumers detect staleness.
    #[serde(skip)]
    pub version: u64,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 1.0,
            equalize: false,
            filter: FilterKind::None,
            zoom: 1.0,
            threshold: ThresholdParams::default(),
            version: 0,
        }
    }
}

impl ProcessingParams {
    /// Clamp out-of-range values to their documented domains.
    pub fn sanitized(mut self) -> Self {
        self.brightness = self.brightness.clamp(-1.0, 1.0);
        self.contrast = self.contrast.max(0.0);
        self.zoom = self.zoom.max(1.0);
        self
    }
}
