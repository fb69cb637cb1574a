//! Upload slot drop zones: file picking, drop routing and previews.

use std::path::PathBuf;

use eframe::egui;
use shared::{
    domain::ImageSlot,
    error::UploadError,
    upload::{SelectedImage, ACCEPTED_EXTENSIONS, UPLOAD_HINT},
};

use crate::media::{decode_preview_image, fit_size, UPLOAD_PREVIEW_MAX_DIMENSION};
use crate::ui::theme;

const DROP_ZONE_HEIGHT: f32 = 280.0;
const CAPTION_HEIGHT: f32 = 36.0;
const REPLACE_CAPTION: &str = "Click or drag to replace";

/// Decoded thumbnail for an occupied slot.
pub enum SlotPreview {
    Ready {
        texture: egui::TextureHandle,
        size: egui::Vec2,
    },
    /// The file passed the type allowlist but could not be decoded. It is
    /// still submitted; only the thumbnail is missing.
    Unavailable(String),
}

impl SlotPreview {
    pub fn load(ctx: &egui::Context, slot: ImageSlot, image: &SelectedImage) -> Self {
        match decode_preview_image(&image.bytes, UPLOAD_PREVIEW_MAX_DIMENSION) {
            Ok(preview) => {
                let size = egui::vec2(preview.width as f32, preview.height as f32);
                let texture = ctx.load_texture(
                    format!("upload-preview:{}", slot.field_name()),
                    preview.to_color_image(),
                    egui::TextureOptions::LINEAR,
                );
                Self::Ready { texture, size }
            }
            Err(reason) => {
                tracing::warn!(
                    slot = slot.field_name(),
                    file_name = %image.file_name,
                    "upload preview failed: {reason}"
                );
                Self::Unavailable(reason)
            }
        }
    }
}

pub fn pick_image_file() -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().add_filter("Images", &ACCEPTED_EXTENSIONS);
    if let Some(dir) = default_upload_dir() {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file()
}

fn default_upload_dir() -> Option<PathBuf> {
    dirs::picture_dir()
        .or_else(dirs::desktop_dir)
        .or_else(dirs::download_dir)
        .or_else(dirs::home_dir)
}

pub fn image_from_dropped_file(file: &egui::DroppedFile) -> Result<SelectedImage, UploadError> {
    if let Some(path) = &file.path {
        return SelectedImage::from_path(path);
    }
    let file_name = if file.name.trim().is_empty() {
        "dropped file"
    } else {
        file.name.as_str()
    };
    match &file.bytes {
        Some(bytes) => SelectedImage::from_bytes(file_name, Some(file.mime.as_str()), bytes.to_vec()),
        None => Err(UploadError::Unreadable {
            file_name: file_name.to_string(),
            reason: "the drop carried no file data".to_string(),
        }),
    }
}

/// Dropped files are window-global, so route them to the zone under the
/// pointer, else to the first empty slot, else to the user photo.
pub fn pick_drop_slot(
    pointer: Option<egui::Pos2>,
    zones: &[(ImageSlot, egui::Rect)],
    occupied: impl Fn(ImageSlot) -> bool,
) -> ImageSlot {
    if let Some(pos) = pointer {
        if let Some((slot, _)) = zones.iter().find(|(_, rect)| rect.contains(pos)) {
            return *slot;
        }
    }
    ImageSlot::ALL
        .into_iter()
        .find(|slot| !occupied(*slot))
        .unwrap_or(ImageSlot::User)
}

/// Draws one slot. The returned response is clickable and its rect is the
/// drop target.
pub fn show_upload_slot(
    ui: &mut egui::Ui,
    slot: ImageSlot,
    image: Option<&SelectedImage>,
    preview: Option<&SlotPreview>,
    files_hovering: bool,
    enabled: bool,
) -> egui::Response {
    ui.label(egui::RichText::new(slot.heading()).strong().size(16.0));
    ui.add_space(4.0);

    let size = egui::vec2(ui.available_width(), DROP_ZONE_HEIGHT);
    let sense = if enabled {
        egui::Sense::click()
    } else {
        egui::Sense::hover()
    };
    let (rect, response) = ui.allocate_exact_size(size, sense);
    let response = if enabled {
        response.on_hover_cursor(egui::CursorIcon::PointingHand)
    } else {
        response
    };

    let highlighted = enabled && (response.hovered() || files_hovering);
    let stroke_color = if highlighted {
        theme::ACCENT
    } else {
        theme::CARD_STROKE
    };
    let fill = if highlighted {
        theme::lighten_color(theme::CARD_BACKGROUND, 0.04)
    } else {
        theme::CARD_BACKGROUND
    };

    let painter = ui.painter_at(rect);
    painter.rect(
        rect,
        10.0,
        fill,
        egui::Stroke::new(if highlighted { 2.0 } else { 1.0 }, stroke_color),
        egui::StrokeKind::Inside,
    );

    let inner = rect.shrink(12.0);
    match (image, preview) {
        (Some(image), Some(SlotPreview::Ready { texture, size })) => {
            let image_area = egui::Rect::from_min_max(
                inner.min,
                egui::pos2(inner.max.x, inner.max.y - CAPTION_HEIGHT),
            );
            let fitted = fit_size(*size, image_area.size(), false);
            let image_rect = egui::Rect::from_center_size(image_area.center(), fitted);
            painter.image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
            paint_caption(&painter, inner, &image.file_name);
        }
        (Some(image), _) => {
            painter.text(
                inner.center() - egui::vec2(0.0, 12.0),
                egui::Align2::CENTER_CENTER,
                "Preview not available",
                egui::FontId::proportional(15.0),
                theme::MUTED_TEXT,
            );
            paint_caption(&painter, inner, &image.file_name);
        }
        (None, _) => {
            painter.text(
                inner.center() - egui::vec2(0.0, 10.0),
                egui::Align2::CENTER_CENTER,
                slot.upload_prompt(),
                egui::FontId::proportional(15.0),
                theme::TEXT,
            );
            painter.text(
                inner.center() + egui::vec2(0.0, 14.0),
                egui::Align2::CENTER_CENTER,
                UPLOAD_HINT,
                egui::FontId::proportional(12.0),
                theme::MUTED_TEXT,
            );
        }
    }

    response
}

fn paint_caption(painter: &egui::Painter, inner: egui::Rect, file_name: &str) {
    painter.text(
        egui::pos2(inner.center().x, inner.max.y - CAPTION_HEIGHT + 8.0),
        egui::Align2::CENTER_CENTER,
        file_name,
        egui::FontId::proportional(13.0),
        theme::TEXT,
    );
    painter.text(
        egui::pos2(inner.center().x, inner.max.y - 6.0),
        egui::Align2::CENTER_BOTTOM,
        REPLACE_CAPTION,
        egui::FontId::proportional(12.0),
        theme::MUTED_TEXT,
    );
}

#[cfg(test)]
#[path = "tests/uploader_tests.rs"]
mod tests;
