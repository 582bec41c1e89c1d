//! Small reusable pieces of the game screen.

use client_core::{AnswerOption, SessionFailure};
use eframe::egui;
use egui::TextureHandle;

/// Texture cache entry for one remote image.
pub enum ImageSlot {
    Loading,
    Ready(TextureHandle),
    Failed(String),
}

pub fn texture_from_preview(
    ctx: &egui::Context,
    url: &str,
    image: &crate::backend_bridge::images::PreviewImage,
) -> TextureHandle {
    let color_image =
        egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
    ctx.load_texture(
        format!("remote-image:{url}"),
        color_image,
        egui::TextureOptions::LINEAR,
    )
}

/// Draws `slot` scaled into `max_size`. The response senses clicks so callers
/// can open the detail overlay.
pub fn image_slot(ui: &mut egui::Ui, slot: Option<&ImageSlot>, max_size: egui::Vec2) -> egui::Response {
    match slot {
        Some(ImageSlot::Ready(texture)) => {
            let mut size = texture.size_vec2();
            let scale = (max_size.x / size.x).min(max_size.y / size.y).min(1.0);
            size *= scale;
            ui.add(
                egui::Image::new(texture)
                    .fit_to_exact_size(size)
                    .sense(egui::Sense::click()),
            )
        }
        Some(ImageSlot::Failed(reason)) => ui.weak(format!("Image unavailable: {reason}")),
        Some(ImageSlot::Loading) | None => ui.spinner(),
    }
}

/// One radio row per option; `selected` holds the chosen option id.
pub fn answer_radios(ui: &mut egui::Ui, options: &[AnswerOption], selected: &mut Option<String>) {
    for option in options {
        ui.radio_value(selected, Some(option.id.clone()), option.value.as_str());
    }
}

/// Red banner describing a failed request. Returns true when Retry was
/// clicked.
pub fn failure_banner(ui: &mut egui::Ui, failure: &SessionFailure) -> bool {
    let mut retry = false;
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .show(ui, |ui| {
            ui.colored_label(
                ui.visuals().error_fg_color,
                format!("Request for {} failed", failure.stage.label()),
            );
            ui.label(&failure.message);
            if failure.retry.is_some() {
                let label = if failure.retryable {
                    "Retry"
                } else {
                    "Try again anyway"
                };
                retry = ui.button(label).clicked();
            }
        });
    retry
}
