use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use lupa_core::analyze::{analyze, RoiAnalysis, DEFAULT_PEAK_MIN_DISTANCE};
use lupa_core::capture::{CaptureDevice, DeviceProperty, FrameSource, SourceEvent, SyntheticCamera};
use lupa_core::frame::{ColorFrame, ViewImage};
use lupa_core::geometry::SourceRect;
use lupa_core::image_io::load_color_image;
use lupa_core::params::ProcessingParams;
use lupa_core::pipeline::{apply_global, apply_local, zoomed_base};

use crate::convert::{color_frame_to_image, view_to_color_image};
use crate::panels;
use crate::state::{RoiDisplayMode, RoiDragState, SourceMode, UIState};

const CAMERA_INTERVAL: Duration = Duration::from_millis(33);
const CAMERA_WIDTH: usize = 640;
const CAMERA_HEIGHT: usize = 480;

pub struct LupaApp {
    pub mode: SourceMode,
    source: Option<FrameSource>,
    /// Latest raw frame, kept unprocessed so both pipeline tiers and
    /// every parameter change re-derive from the same pixels.
    pub base: Option<ColorFrame>,
    pub params: ProcessingParams,
    pub roi: Option<SourceRect>,
    pub analysis: Option<RoiAnalysis>,
    pub roi_display: RoiDisplayMode,
    pub drag: RoiDragState,
    pub ui_state: UIState,
    pub main_texture: Option<egui::TextureHandle>,
    pub roi_texture: Option<egui::TextureHandle>,
    dirty: bool,
    picked_tx: mpsc::Sender<PathBuf>,
    picked_rx: mpsc::Receiver<PathBuf>,
}

impl LupaApp {
    pub fn new() -> Self {
        let (picked_tx, picked_rx) = mpsc::channel();
        Self {
            mode: SourceMode::default(),
            source: None,
            base: None,
            params: ProcessingParams::default(),
            roi: None,
            analysis: None,
            roi_display: RoiDisplayMode::default(),
            drag: RoiDragState::default(),
            ui_state: UIState::default(),
            main_texture: None,
            roi_texture: None,
            dirty: false,
            picked_tx,
            picked_rx,
        }
    }

    /// Run the file dialog off the UI thread; the chosen path comes
    /// back through the channel on a later frame.
    pub fn pick_image(&self) {
        let tx = self.picked_tx.clone();
        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg", "bmp"])
                .add_filter("All files", &["*"])
                .pick_file()
            {
                let _ = tx.send(path);
            }
        });
    }

    pub fn open_image(&mut self, path: PathBuf) {
        self.stop_camera();
        match load_color_image(&path) {
            Ok(image) => {
                self.ui_state.add_log(format!(
                    "Opened: {} ({}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                ));
                self.base = Some(image);
                self.mode = SourceMode::StaticLoaded { path };
                self.mark_dirty();
            }
            Err(e) => {
                self.ui_state
                    .add_log(format!("ERROR: failed to load {}: {e}", path.display()));
            }
        }
    }

    pub fn start_camera(&mut self) {
        self.stop_camera();
        let source = FrameSource::start(
            || {
                Ok(Box::new(SyntheticCamera::new(CAMERA_WIDTH, CAMERA_HEIGHT))
                    as Box<dyn CaptureDevice>)
            },
            CAMERA_INTERVAL,
        );
        let focus = self.ui_state.focus;
        source.set_property(DeviceProperty::Focus, focus as f64);
        self.source = Some(source);
        self.mode = SourceMode::CameraActive;
        self.ui_state.add_log("Camera started");
    }

    /// Stop acquisition; the last frame stays on screen frozen.
    pub fn stop_camera(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.stop();
            self.ui_state.add_log("Camera stopped");
        }
        if self.mode.is_camera() {
            self.mode = SourceMode::NoSource;
        }
    }

    pub fn set_focus(&mut self, value: f32) {
        self.ui_state.focus = value;
        if let Some(ref source) = self.source {
            source.set_property(DeviceProperty::Focus, value as f64);
        }
    }

    pub fn set_roi(&mut self, roi: SourceRect) {
        self.roi = Some(roi);
        self.mark_dirty();
    }

    pub fn clear_roi(&mut self) {
        self.roi = None;
        self.analysis = None;
        self.roi_texture = None;
        self.mark_dirty();
    }

    pub fn mark_dirty(&mut self) {
        self.params.version += 1;
        self.dirty = true;
    }

    fn poll_source(&mut self) {
        let Some(mailbox) = self.source.as_ref().map(|s| s.mailbox()) else {
            return;
        };
        // The mailbox holds at most the latest event.
        while let Some(event) = mailbox.try_take() {
            match event {
                SourceEvent::Frame(frame) => {
                    self.base = Some(frame);
                    self.dirty = true;
                }
                SourceEvent::Ended => {
                    self.ui_state.add_log("Camera stream ended");
                    self.stop_camera();
                }
                SourceEvent::Failed(message) => {
                    self.ui_state.add_log(format!("ERROR: camera failed: {message}"));
                    self.stop_camera();
                }
            }
        }
    }

    /// Re-run both pipeline tiers and refresh the textures.
    fn reprocess(&mut self, ctx: &egui::Context) {
        let Some(ref base) = self.base else {
            return;
        };

        let zoomed = zoomed_base(base, self.params.zoom);
        let Some(global) = apply_global(&zoomed, &self.params) else {
            return;
        };

        if let Some(roi) = self.roi {
            if !roi.fits(zoomed.width(), zoomed.height()) {
                tracing::info!(
                    "selection ({},{})-({},{}) no longer fits the {}x{} frame, clearing",
                    roi.x1,
                    roi.y1,
                    roi.x2,
                    roi.y2,
                    zoomed.width(),
                    zoomed.height()
                );
                self.ui_state.add_log("Selection cleared: frame geometry changed");
                self.roi = None;
            }
        }

        let local = self
            .roi
            .and_then(|roi| apply_local(&zoomed, &roi, &self.params));
        self.analysis = local
            .as_ref()
            .and_then(|view| analyze(view, DEFAULT_PEAK_MIN_DISTANCE));

        let main_view = match (self.roi, &local, self.roi_display) {
            (Some(roi), Some(local), RoiDisplayMode::PasteBack) => {
                ViewImage::Color(paste_back(&global.to_color(), &local.to_color(), &roi))
            }
            _ => global,
        };

        self.main_texture = Some(ctx.load_texture(
            "main-view",
            view_to_color_image(&main_view),
            egui::TextureOptions::NEAREST,
        ));
        self.roi_texture = self.analysis.as_ref().map(|analysis| {
            ctx.load_texture(
                "roi-view",
                color_frame_to_image(&analysis.annotated),
                egui::TextureOptions::NEAREST,
            )
        });

        self.dirty = false;
    }
}

impl eframe::App for LupaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(path) = self.picked_rx.try_recv() {
            self.open_image(path);
        }

        self.poll_source();
        if self.dirty {
            self.reprocess(ctx);
        }

        panels::controls::show(ctx, self);
        panels::roi_panel::show(ctx, self);
        panels::profile_panel::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.mode.is_camera() {
            ctx.request_repaint_after(CAMERA_INTERVAL / 2);
        }
    }
}

/// Composite the processed ROI over the full-frame view at its source
/// position. Both inputs come from the same zoomed base, so the ROI
/// dimensions always match the region.
fn paste_back(global: &ColorFrame, local: &ColorFrame, roi: &SourceRect) -> ColorFrame {
    let mut out = global.clone();
    let (x0, y0) = (roi.x1 as usize, roi.y1 as usize);

    for row in 0..local.height() {
        for col in 0..local.width() {
            out.red.data[[y0 + row, x0 + col]] = local.red.data[[row, col]];
            out.green.data[[y0 + row, x0 + col]] = local.green.data[[row, col]];
            out.blue.data[[y0 + row, x0 + col]] = local.blue.data[[row, col]];
        }
    }
    out
}
