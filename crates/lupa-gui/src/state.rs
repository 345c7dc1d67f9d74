use std::path::PathBuf;

/// Where frames currently come from.
///
/// Transitions: `NoSource -> StaticLoaded` on open, `* -> CameraActive`
/// on start, `CameraActive -> NoSource` on stop/end/failure (the last
/// frame stays on screen frozen).
#[derive(Debug, Default)]
pub enum SourceMode {
    #[default]
    NoSource,
    StaticLoaded {
        path: PathBuf,
    },
    CameraActive,
}

impl SourceMode {
    pub fn is_camera(&self) -> bool {
        matches!(self, SourceMode::CameraActive)
    }

    pub fn label(&self) -> String {
        match self {
            SourceMode::NoSource => String::new(),
            SourceMode::StaticLoaded { path } => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            SourceMode::CameraActive => "Live".to_string(),
        }
    }
}

/// How the main view presents the selected region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoiDisplayMode {
    /// No decoration on the main view.
    #[default]
    Plain,
    /// Outline the selection on the main view.
    Outline,
    /// Composite the processed ROI back into the main view.
    PasteBack,
}

pub const ROI_DISPLAY_NAMES: &[&str] = &["Plain", "Outline", "Paste back"];

impl RoiDisplayMode {
    pub fn from_index(i: usize) -> Self {
        match i {
            1 => RoiDisplayMode::Outline,
            2 => RoiDisplayMode::PasteBack,
            _ => RoiDisplayMode::Plain,
        }
    }

    pub fn index(self) -> usize {
        match self {
            RoiDisplayMode::Plain => 0,
            RoiDisplayMode::Outline => 1,
            RoiDisplayMode::PasteBack => 2,
        }
    }
}

/// In-progress rubber-band selection, in viewport widget coordinates.
#[derive(Default)]
pub struct RoiDragState {
    pub start: Option<egui::Pos2>,
}

const MAX_LOG_LINES: usize = 100;

#[derive(Default)]
pub struct UIState {
    pub log: Vec<String>,
    /// Requested camera focus on the 0-255 device scale.
    pub focus: f32,
}

impl UIState {
    pub fn add_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
        if self.log.len() > MAX_LOG_LINES {
            self.log.remove(0);
        }
    }
}
