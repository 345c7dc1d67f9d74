use serde::{Deserialize, Serialize};

/// Minimum ROI side length in source pixels. Selections at or below
/// this extent are rejected.
pub const MIN_ROI_EXTENT: u32 = 5;

/// A region of interest in source-image coordinates.
///
/// Stored in source space (never widget or display space) so it stays
/// valid under window resize and display rescaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl SourceRect {
    /// Build a rect from two unordered corner points, normalizing so
    /// `(x1,y1)` is the top-left. Returns `None` when either side is at
    /// or below the minimum extent.
    pub fn from_corners(a: [u32; 2], b: [u32; 2]) -> Option<SourceRect> {
        let rect = SourceRect {
            x1: a[0].min(b[0]),
            y1: a[1].min(b[1]),
            x2: a[0].max(b[0]),
            y2: a[1].max(b[1]),
        };
        if rect.width() > MIN_ROI_EXTENT && rect.height() > MIN_ROI_EXTENT {
            Some(rect)
        } else {
            None
        }
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// Whether the rect lies fully inside a frame of the given size.
    ///
    /// A stored ROI that stops fitting the current frame (e.g. the
    /// effective source framing changed) must be invalidated by the
    /// caller, not clamped.
    pub fn fits(&self, frame_width: usize, frame_height: usize) -> bool {
        (self.x2 as usize) <= frame_width && (self.y2 as usize) <= frame_height
    }
}

/// Mapping between the three coordinate spaces of a displayed frame:
/// host widget, scaled display surface, and original source image.
///
/// The surface is letter/pillar-boxed (aspect-preserving) and centered
/// inside the widget.
#[derive(Clone, Copy, Debug)]
pub struct DisplayGeometry {
    /// Widget size in display points.
    pub widget: [f32; 2],
    /// Displayed surface size in display points.
    pub surface: [f32; 2],
    /// Source image size in pixels.
    pub source: [u32; 2],
}

impl DisplayGeometry {
    /// Compute the aspect-preserving fit of `source` inside `widget`.
    pub fn fit(widget: [f32; 2], source: [u32; 2]) -> DisplayGeometry {
        let surface = if source[0] == 0 || source[1] == 0 || widget[0] <= 0.0 || widget[1] <= 0.0 {
            [0.0, 0.0]
        } else {
            let scale = (widget[0] / source[0] as f32).min(widget[1] / source[1] as f32);
            [source[0] as f32 * scale, source[1] as f32 * scale]
        };
        DisplayGeometry {
            widget,
            surface,
            source,
        }
    }

    /// Top-left corner of the surface inside the widget.
    pub fn offset(&self) -> [f32; 2] {
        [
            (self.widget[0] - self.surface[0]) / 2.0,
            (self.widget[1] - self.surface[1]) / 2.0,
        ]
    }

    /// Map a widget-space point to source pixel coordinates.
    ///
    /// Points outside the surface are clamped, not rejected: a drag
    /// that leaves the widget still normalizes to a valid position.
    pub fn to_source(&self, point: [f32; 2]) -> [u32; 2] {
        if self.surface[0] <= 0.0 || self.surface[1] <= 0.0 {
            return [0, 0];
        }
        let offset = self.offset();
        let sx = (point[0] - offset[0]).clamp(0.0, self.surface[0]);
        let sy = (point[1] - offset[1]).clamp(0.0, self.surface[1]);
        [
            ((sx * self.source[0] as f32 / self.surface[0]) as u32).min(self.source[0]),
            ((sy * self.source[1] as f32 / self.surface[1]) as u32).min(self.source[1]),
        ]
    }

    /// Map a source pixel coordinate back to widget space (inverse of
    /// `to_source` within integer truncation).
    pub fn to_display(&self, point: [u32; 2]) -> [f32; 2] {
        if self.source[0] == 0 || self.source[1] == 0 {
            return self.offset();
        }
        let offset = self.offset();
        [
            point[0] as f32 * self.surface[0] / self.source[0] as f32 + offset[0],
            point[1] as f32 * self.surface[1] / self.source[1] as f32 + offset[1],
        ]
    }

    /// Map a widget-space drag rectangle to a source-space ROI.
    ///
    /// Returns `None` ("no selection") when the normalized rect falls
    /// below the minimum extent; the caller keeps its previous ROI.
    pub fn rect_to_source(&self, a: [f32; 2], b: [f32; 2]) -> Option<SourceRect> {
        SourceRect::from_corners(self.to_source(a), self.to_source(b))
    }
}
