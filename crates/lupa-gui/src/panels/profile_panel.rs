use egui_plot::{Line, Plot, PlotPoints, VLine};

use crate::app::LupaApp;

const PANEL_HEIGHT: f32 = 180.0;

/// Bottom panel: the 1-D column-intensity profile of the ROI with a
/// marker at each detected peak.
pub fn show(ctx: &egui::Context, app: &mut LupaApp) {
    let Some(ref analysis) = app.analysis else {
        return;
    };

    egui::TopBottomPanel::bottom("profile")
        .default_height(PANEL_HEIGHT)
        .resizable(true)
        .show(ctx, |ui| {
            let points: PlotPoints = analysis
                .profile
                .iter()
                .enumerate()
                .map(|(col, &value)| [col as f64, value as f64])
                .collect();

            let line = Line::new("intensity", points)
                .color(egui::Color32::from_rgb(100, 180, 255));

            let peaks: Vec<VLine> = analysis
                .peaks
                .iter()
                .map(|&col| {
                    VLine::new(format!("peak {col}"), col as f64)
                        .color(egui::Color32::from_rgb(230, 80, 80))
                        .width(1.0)
                })
                .collect();

            Plot::new("roi_profile")
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .allow_boxed_zoom(false)
                .x_axis_label("column")
                .y_axis_label("intensity")
                .show(ui, |plot_ui| {
                    plot_ui.line(line);
                    for vline in peaks {
                        plot_ui.vline(vline);
                    }
                });
        });
}
