use lupa_core::geometry::DisplayGeometry;

use crate::app::LupaApp;
use crate::state::RoiDisplayMode;

pub fn show(ctx: &egui::Context, app: &mut LupaApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let texture_info = app
            .main_texture
            .as_ref()
            .map(|t| (t.id(), [t.size()[0] as u32, t.size()[1] as u32]));

        let Some((texture_id, source_size)) = texture_info else {
            show_placeholder(ui);
            return;
        };

        let geometry = DisplayGeometry::fit([rect.width(), rect.height()], source_size);
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        draw_image(ui, texture_id, rect, &geometry);
        handle_roi_drag(ui, &response, app, rect, &geometry);

        if matches!(
            app.roi_display,
            RoiDisplayMode::Outline | RoiDisplayMode::PasteBack
        ) {
            if let Some(roi) = app.roi {
                let min = geometry.to_display([roi.x1, roi.y1]);
                let max = geometry.to_display([roi.x2, roi.y2]);
                draw_selection_rect(
                    ui,
                    egui::Rect::from_min_max(
                        rect.min + egui::vec2(min[0], min[1]),
                        rect.min + egui::vec2(max[0], max[1]),
                    ),
                );
            }
        }

        draw_source_label(ui, rect, &app.mode.label());
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, rect: egui::Rect, geometry: &DisplayGeometry) {
    let offset = geometry.offset();
    let img_rect = egui::Rect::from_min_size(
        rect.min + egui::vec2(offset[0], offset[1]),
        egui::vec2(geometry.surface[0], geometry.surface[1]),
    );
    ui.painter().image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

/// Rubber-band selection. Corners are carried in widget space and only
/// committed to source space when the drag ends; a too-small selection
/// leaves the previous one untouched.
fn handle_roi_drag(
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut LupaApp,
    rect: egui::Rect,
    geometry: &DisplayGeometry,
) {
    if response.drag_started_by(egui::PointerButton::Primary) {
        app.drag.start = response.interact_pointer_pos();
    }

    if let Some(start) = app.drag.start {
        if let Some(current) = ui.input(|i| i.pointer.hover_pos()) {
            draw_selection_rect(ui, egui::Rect::from_two_pos(start, current));
        }

        if response.drag_stopped_by(egui::PointerButton::Primary) {
            app.drag.start = None;
            let end = response
                .interact_pointer_pos()
                .unwrap_or(start);
            let a = start - rect.min;
            let b = end - rect.min;
            match geometry.rect_to_source([a.x, a.y], [b.x, b.y]) {
                Some(roi) => app.set_roi(roi),
                None => app.ui_state.add_log("Selection too small, ignored"),
            }
        }
    }

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
    }
}

fn draw_selection_rect(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter().rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(1.5, egui::Color32::from_rgb(255, 255, 0)),
        egui::epaint::StrokeKind::Outside,
    );
}

fn draw_source_label(ui: &egui::Ui, rect: egui::Rect, label: &str) {
    if label.is_empty() {
        return;
    }
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    ui.painter().text(
        label_pos,
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open an image or start the camera to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
