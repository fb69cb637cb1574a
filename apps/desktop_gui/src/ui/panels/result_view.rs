//! Composite result image with download, clipboard and fullscreen actions.

use eframe::egui;
use shared::protocol::ProcessImagesResponse;

use crate::media::{fit_size, PreviewImage};
use crate::ui::panels::measurements::{notice, show_measurements};
use crate::ui::theme;

pub const DEFAULT_DOWNLOAD_NAME: &str = "virtual-fitting-result.jpg";

const IMAGE_QUALITY_NOTICE: &str = "This is a virtual try-on preview. Actual garment appearance \
may vary slightly. For best results, use a well-lit, front-facing photo against a plain background.";

pub enum ResultImage {
    Loading,
    Loaded {
        texture: egui::TextureHandle,
        size: egui::Vec2,
        original_bytes: Vec<u8>,
    },
    Failed(String),
}

impl ResultImage {
    pub fn loaded(ctx: &egui::Context, image: PreviewImage, original_bytes: Vec<u8>) -> Self {
        let size = egui::vec2(image.width as f32, image.height as f32);
        let texture = ctx.load_texture("result-image", image.to_color_image(), egui::TextureOptions::LINEAR);
        Self::Loaded {
            texture,
            size,
            original_bytes,
        }
    }

    pub fn original_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Loaded { original_bytes, .. } => Some(original_bytes),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultAction {
    TryAnother,
    Download,
    CopyImage,
    EnterFullscreen,
    RetryImage,
}

pub fn show_result_view(
    ui: &mut egui::Ui,
    response: &ProcessImagesResponse,
    image: &ResultImage,
) -> Option<ResultAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.heading("Virtual Try-On Result");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Try Another").clicked() {
                action = Some(ResultAction::TryAnother);
            }
        });
    });
    ui.add_space(8.0);

    ui.columns(2, |columns| {
        if let Some(image_action) = show_image_column(&mut columns[0], image) {
            action = Some(image_action);
        }
        egui::ScrollArea::vertical()
            .id_salt("measurements_scroll")
            .show(&mut columns[1], |ui| {
                show_measurements(ui, response.measurements);
            });
    });

    action
}

fn show_image_column(ui: &mut egui::Ui, image: &ResultImage) -> Option<ResultAction> {
    let mut action = None;
    let max_height = (ui.available_height() - 180.0).max(200.0);

    match image {
        ResultImage::Loading => {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Loading result image...");
            });
        }
        ResultImage::Failed(reason) => {
            ui.label(egui::RichText::new(reason).color(theme::MUTED_TEXT));
            if ui.button("Retry").clicked() {
                action = Some(ResultAction::RetryImage);
            }
        }
        ResultImage::Loaded { texture, size, .. } => {
            let fitted = fit_size(*size, egui::vec2(ui.available_width(), max_height), true);
            let response = ui
                .add(
                    egui::Image::new(texture)
                        .fit_to_exact_size(fitted)
                        .corner_radius(8.0)
                        .sense(egui::Sense::click()),
                )
                .on_hover_text("View fullscreen");
            if response.clicked() {
                action = Some(ResultAction::EnterFullscreen);
            }
        }
    }

    ui.add_space(6.0);
    let loaded = matches!(image, ResultImage::Loaded { .. });
    ui.horizontal(|ui| {
        if ui
            .add_enabled(loaded, egui::Button::new("Fullscreen"))
            .clicked()
        {
            action = Some(ResultAction::EnterFullscreen);
        }
        if ui
            .add_enabled(loaded, egui::Button::new("Download"))
            .on_hover_text("Download image")
            .clicked()
        {
            action = Some(ResultAction::Download);
        }
        if ui
            .add_enabled(loaded, egui::Button::new("Copy image"))
            .clicked()
        {
            action = Some(ResultAction::CopyImage);
        }
    });

    ui.add_space(10.0);
    notice(ui, "Image Quality", IMAGE_QUALITY_NOTICE);
    action
}

/// Draws the result image alone over the whole viewport. Returns `true` when
/// the user asked to leave fullscreen.
pub fn show_fullscreen(ctx: &egui::Context, image: &ResultImage) -> bool {
    let ResultImage::Loaded { texture, size, .. } = image else {
        return true;
    };
    let mut exit = ctx.input(|i| i.key_pressed(egui::Key::Escape));

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
        .show(ctx, |ui| {
            let available = ui.max_rect();
            let fitted = fit_size(*size, available.size(), true);
            let image_rect = egui::Rect::from_center_size(available.center(), fitted);
            let response = ui.put(
                image_rect,
                egui::Image::new(texture)
                    .fit_to_exact_size(fitted)
                    .sense(egui::Sense::click()),
            );
            if response.double_clicked() {
                exit = true;
            }

            let button_rect = egui::Rect::from_min_size(
                available.right_top() + egui::vec2(-150.0, 12.0),
                egui::vec2(138.0, 28.0),
            );
            if ui.put(button_rect, egui::Button::new("Exit fullscreen (Esc)")).clicked() {
                exit = true;
            }
        });

    exit
}
