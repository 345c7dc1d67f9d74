use crate::app::LupaApp;

const RIGHT_PANEL_WIDTH: f32 = 320.0;

/// Right-hand panel: the processed ROI with peak markers, plus the
/// numeric peak readout.
pub fn show(ctx: &egui::Context, app: &mut LupaApp) {
    egui::SidePanel::right("roi")
        .default_width(RIGHT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            super::section_header(ui, "Region of Interest", None);
            ui.add_space(4.0);

            let Some(texture) = app.roi_texture.as_ref() else {
                ui.small("No region selected");
                return;
            };

            let size = texture.size();
            let avail = ui.available_width();
            let scale = (avail / size[0] as f32).min(1.0);
            let display = egui::vec2(size[0] as f32 * scale, size[1] as f32 * scale);
            ui.image((texture.id(), display));

            if let Some(ref analysis) = app.analysis {
                ui.add_space(8.0);
                if analysis.peaks.is_empty() {
                    ui.small("No peaks detected");
                } else {
                    ui.small(format!("{} peak(s)", analysis.peaks.len()));
                    for &col in &analysis.peaks {
                        ui.small(format!("  col {col}: {:.1}", analysis.profile[col]));
                    }
                }
            }
        });
}
