use ndarray::Array2;

/// A single grayscale image plane.
/// Pixel values are f32 in [0.0, 1.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Original bit depth before conversion (8 or 16)
    pub original_bit_depth: u8,
    /// Optional per-frame metadata
    pub metadata: FrameMetadata,
}

impl Frame {
    pub fn new(data: Array2<f32>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
            metadata: FrameMetadata::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrameMetadata {
    /// Monotonic capture sequence id assigned by the frame source.
    pub frame_index: u64,
    pub timestamp_us: Option<u64>,
}

/// Color image composed of separate channel planes.
#[derive(Clone, Debug)]
pub struct ColorFrame {
    pub red: Frame,
    pub green: Frame,
    pub blue: Frame,
}

impl ColorFrame {
    pub fn width(&self) -> usize {
        self.red.width()
    }

    pub fn height(&self) -> usize {
        self.red.height()
    }

    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }

    /// Rec.601 luminance of the three channels.
    pub fn luminance(&self) -> Frame {
        let mut data = Array2::<f32>::zeros((self.height(), self.width()));
        for row in 0..self.height() {
            for col in 0..self.width() {
                data[[row, col]] = 0.299 * self.red.data[[row, col]]
                    + 0.587 * self.green.data[[row, col]]
                    + 0.114 * self.blue.data[[row, col]];
            }
        }
        let mut frame = Frame::new(data, self.red.original_bit_depth);
        frame.metadata = self.red.metadata.clone();
        frame
    }

    /// Apply `f` to each channel plane.
    pub fn map_channels(&self, mut f: impl FnMut(&Frame) -> Frame) -> ColorFrame {
        ColorFrame {
            red: f(&self.red),
            green: f(&self.green),
            blue: f(&self.blue),
        }
    }

    /// Replicate a single plane into all three channels.
    pub fn from_mono(frame: &Frame) -> ColorFrame {
        ColorFrame {
            red: frame.clone(),
            green: frame.clone(),
            blue: frame.clone(),
        }
    }
}

/// An immutable processed-image snapshot passed between pipeline stages.
///
/// Stages that force single-channel output (equalize, threshold, edge
/// detection) collapse to `Mono`; the render sink re-expands to color
/// for display.
#[derive(Clone, Debug)]
pub enum ViewImage {
    Mono(Frame),
    Color(ColorFrame),
}

impl ViewImage {
    pub fn width(&self) -> usize {
        match self {
            ViewImage::Mono(f) => f.width(),
            ViewImage::Color(cf) => cf.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            ViewImage::Mono(f) => f.height(),
            ViewImage::Color(cf) => cf.height(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Single-channel intensity representation.
    pub fn luminance(&self) -> Frame {
        match self {
            ViewImage::Mono(f) => f.clone(),
            ViewImage::Color(cf) => cf.luminance(),
        }
    }

    /// Three-channel representation for display and annotation.
    pub fn to_color(&self) -> ColorFrame {
        match self {
            ViewImage::Mono(f) => ColorFrame::from_mono(f),
            ViewImage::Color(cf) => cf.clone(),
        }
    }

    /// Apply `f` per channel plane, preserving the channel layout.
    pub fn map_planes(&self, mut f: impl FnMut(&Frame) -> Frame) -> ViewImage {
        match self {
            ViewImage::Mono(frame) => ViewImage::Mono(f(frame)),
            ViewImage::Color(cf) => ViewImage::Color(cf.map_channels(f)),
        }
    }
}
