use lupa_core::frame::{ColorFrame, ViewImage};
use lupa_core::render;

/// Convert a processed snapshot to an egui ColorImage via the packed
/// RGB8 render sink.
pub fn view_to_color_image(view: &ViewImage) -> egui::ColorImage {
    buffer_to_color_image(&render::to_rgb8(view))
}

pub fn color_frame_to_image(color: &ColorFrame) -> egui::ColorImage {
    view_to_color_image(&ViewImage::Color(color.clone()))
}

fn buffer_to_color_image(buffer: &render::DisplayBuffer) -> egui::ColorImage {
    let pixels = buffer
        .rgb
        .chunks_exact(3)
        .map(|px| egui::Color32::from_rgb(px[0], px[1], px[2]))
        .collect();

    egui::ColorImage {
        size: [buffer.width, buffer.height],
        pixels,
        source_size: Default::default(),
    }
}
