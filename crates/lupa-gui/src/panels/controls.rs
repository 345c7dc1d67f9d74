use lupa_core::params::{FilterKind, ThresholdPolarity};

use crate::app::LupaApp;
use crate::state::{RoiDisplayMode, SourceMode, ROI_DISPLAY_NAMES};

const LEFT_PANEL_WIDTH: f32 = 280.0;

const MAX_CONTRAST: f32 = 3.0;
const MAX_ZOOM: f32 = 5.0;
const MAX_MORPHOLOGY_ITERATIONS: usize = 5;

pub fn show(ctx: &egui::Context, app: &mut LupaApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                source_section(ui, app);
                ui.separator();
                adjustment_section(ui, app);
                ui.separator();
                threshold_section(ui, app);
                ui.separator();
                roi_section(ui, app);
                ui.separator();
                log_section(ui, app);
            });
        });
}

fn source_section(ui: &mut egui::Ui, app: &mut LupaApp) {
    super::section_header(ui, "Source", Some(&app.mode.label()));
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        if ui.button("Open Image...").clicked() {
            app.pick_image();
        }

        if app.mode.is_camera() {
            if ui.button("Stop Camera").clicked() {
                app.stop_camera();
            }
        } else if ui.button("Start Camera").clicked() {
            app.start_camera();
        }
    });

    if app.mode.is_camera() {
        ui.add_space(4.0);
        let mut focus = app.ui_state.focus;
        if ui
            .add(egui::Slider::new(&mut focus, 0.0..=255.0).text("Focus").fixed_decimals(0))
            .changed()
        {
            app.set_focus(focus);
        }
    }

    if let SourceMode::StaticLoaded { .. } = app.mode {
        if let Some(ref base) = app.base {
            ui.small(format!("{}x{}", base.width(), base.height()));
        }
    }
}

fn adjustment_section(ui: &mut egui::Ui, app: &mut LupaApp) {
    super::section_header(ui, "Adjustments", None);
    ui.add_space(4.0);

    // Brightness is exposed on a -100..100 scale and mapped to the
    // normalized additive offset internally.
    let mut brightness = (app.params.brightness * 100.0).round() as i32;
    if ui
        .add(egui::Slider::new(&mut brightness, -100..=100).text("Brightness"))
        .changed()
    {
        app.params.brightness = brightness as f32 / 100.0;
        app.mark_dirty();
    }

    if ui
        .add(
            egui::Slider::new(&mut app.params.contrast, 1.0..=MAX_CONTRAST)
                .text("Contrast")
                .fixed_decimals(2),
        )
        .changed()
    {
        app.mark_dirty();
    }

    if ui
        .add(
            egui::Slider::new(&mut app.params.zoom, 1.0..=MAX_ZOOM)
                .text("Zoom")
                .fixed_decimals(1),
        )
        .changed()
    {
        app.mark_dirty();
    }

    if ui.checkbox(&mut app.params.equalize, "Equalize histogram").changed() {
        app.mark_dirty();
    }

    let mut filter = app.params.filter;
    egui::ComboBox::from_label("Filter")
        .selected_text(filter.label())
        .show_ui(ui, |ui| {
            for &kind in FilterKind::ALL {
                ui.selectable_value(&mut filter, kind, kind.label());
            }
        });
    if filter != app.params.filter {
        app.params.filter = filter;
        app.mark_dirty();
    }
}

fn threshold_section(ui: &mut egui::Ui, app: &mut LupaApp) {
    let status = if app.params.threshold.active {
        Some("on")
    } else {
        None
    };
    super::section_header(ui, "Threshold", status);
    ui.add_space(4.0);

    if ui.checkbox(&mut app.params.threshold.active, "Enable").changed() {
        app.mark_dirty();
    }

    if app.params.threshold.active {
        if ui
            .add(egui::Slider::new(&mut app.params.threshold.value, 0..=255).text("Level"))
            .changed()
        {
            app.mark_dirty();
        }

        let mut inverted = app.params.threshold.polarity == ThresholdPolarity::BinaryInverted;
        if ui.checkbox(&mut inverted, "Inverted").changed() {
            app.params.threshold.polarity = if inverted {
                ThresholdPolarity::BinaryInverted
            } else {
                ThresholdPolarity::Binary
            };
            app.mark_dirty();
        }

        let mut erode = app.params.threshold.erode_iterations as i32;
        if ui
            .add(egui::Slider::new(&mut erode, 0..=MAX_MORPHOLOGY_ITERATIONS as i32).text("Erode"))
            .changed()
        {
            app.params.threshold.erode_iterations = erode as usize;
            app.mark_dirty();
        }

        let mut dilate = app.params.threshold.dilate_iterations as i32;
        if ui
            .add(egui::Slider::new(&mut dilate, 0..=MAX_MORPHOLOGY_ITERATIONS as i32).text("Dilate"))
            .changed()
        {
            app.params.threshold.dilate_iterations = dilate as usize;
            app.mark_dirty();
        }
    }
}

fn roi_section(ui: &mut egui::Ui, app: &mut LupaApp) {
    let status = app
        .roi
        .map(|r| format!("{}x{}", r.width(), r.height()));
    super::section_header(ui, "Region", status.as_deref());
    ui.add_space(4.0);

    ui.small("Drag on the main view to select");

    let mut display_index = app.roi_display.index();
    if egui::ComboBox::from_label("Display")
        .selected_text(ROI_DISPLAY_NAMES[display_index])
        .show_index(ui, &mut display_index, ROI_DISPLAY_NAMES.len(), |i| {
            ROI_DISPLAY_NAMES[i].to_string()
        })
        .changed()
    {
        app.roi_display = RoiDisplayMode::from_index(display_index);
        app.mark_dirty();
    }

    if ui
        .add_enabled(app.roi.is_some(), egui::Button::new("Clear Selection"))
        .clicked()
    {
        app.clear_roi();
    }
}

fn log_section(ui: &mut egui::Ui, app: &mut LupaApp) {
    super::section_header(ui, "Log", None);
    ui.add_space(4.0);

    egui::ScrollArea::vertical()
        .max_height(120.0)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for line in &app.ui_state.log {
                ui.small(line);
            }
        });
}
