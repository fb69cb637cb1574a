use std::{collections::HashMap, fs, path::Path};

use chrono::{DateTime, Local};
use client_core::BackendStatus;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{domain::ImageSlot, upload::SelectedImage};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{Action, AppView, TryOnState, MISSING_IMAGES_MESSAGE};
use crate::media::copy_image_to_clipboard;
use crate::ui::panels::{
    result_view::{show_fullscreen, show_result_view, ResultAction, ResultImage, DEFAULT_DOWNLOAD_NAME},
    uploader::{image_from_dropped_file, pick_drop_slot, pick_image_file, show_upload_slot, SlotPreview},
};
use crate::ui::theme;

const INTRO_TEXT: &str = "Upload your photo and a clothing item to see how it looks on you. \
Our AI will analyze your measurements and provide size recommendations.";

pub struct StartupConfig {
    pub backend_url: String,
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    backend_url: String,
    state: TryOnState,
    error_context: UiErrorContext,
    status: String,
    startup_error: Option<UiError>,
    last_health_check: Option<DateTime<Local>>,
    previews: HashMap<ImageSlot, SlotPreview>,
    drop_zones: Vec<(ImageSlot, egui::Rect)>,
    result_image: ResultImage,
    fullscreen: bool,
    theme_applied: bool,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            backend_url: startup.backend_url,
            state: TryOnState::default(),
            error_context: UiErrorContext::General,
            status: "Starting...".to_string(),
            startup_error: None,
            last_health_check: None,
            previews: HashMap::new(),
            drop_zones: Vec::new(),
            result_image: ResultImage::Loading,
            fullscreen: false,
            theme_applied: false,
        }
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::BackendStatusChanged { status, checked_at }
                | UiEvent::HealthChecked { status, checked_at } => {
                    self.state.apply(Action::BackendStatusChanged(status));
                    self.last_health_check = Some(checked_at);
                    self.status = format!("Backend {}", status.label().to_ascii_lowercase());
                }
                UiEvent::ProcessSucceeded(response) => {
                    let result_url = response.result_url.clone();
                    self.state.apply(Action::ProcessSucceeded(response));
                    self.status = "Processing complete".to_string();
                    self.request_result_image(result_url);
                }
                UiEvent::ProcessFailed(err) => {
                    self.status = format!("{}: {}", err.category().label(), err.message());
                    self.error_context = err.context();
                    self.state
                        .apply(Action::ProcessFailed(err.message().to_string()));
                }
                UiEvent::ResultImageLoaded {
                    result_url,
                    image,
                    original_bytes,
                } => {
                    if self.state.is_current_result(&result_url) {
                        self.result_image = ResultImage::loaded(ctx, image, original_bytes);
                    }
                }
                UiEvent::ResultImageFailed { result_url, reason } => {
                    if self.state.is_current_result(&result_url) {
                        self.result_image = ResultImage::Failed(reason);
                    }
                }
                UiEvent::Error(err) => {
                    self.status = err.message().to_string();
                    if err.context() == UiErrorContext::BackendStartup {
                        self.startup_error = Some(err);
                    }
                }
            }
        }
    }

    fn request_result_image(&mut self, result_url: String) {
        self.result_image = ResultImage::Loading;
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchResultImage { result_url },
            &mut self.status,
        ) {
            self.result_image = ResultImage::Failed(self.status.clone());
        }
    }

    fn select_image(&mut self, ctx: &egui::Context, slot: ImageSlot, image: SelectedImage) {
        tracing::info!(
            slot = slot.field_name(),
            file_name = %image.file_name,
            size_bytes = image.size_bytes(),
            "image selected"
        );
        self.previews
            .insert(slot, SlotPreview::load(ctx, slot, &image));
        self.status = format!("Selected {} for {}", image.file_name, slot.heading());
        self.state.apply(Action::ImageSelected { slot, image });
    }

    fn reject_upload(&mut self, message: String) {
        tracing::warn!("upload rejected: {message}");
        self.error_context = UiErrorContext::Upload;
        self.status = message.clone();
        self.state.apply(Action::UploadRejected(message));
    }

    fn pick_file_for(&mut self, ctx: &egui::Context, slot: ImageSlot) {
        let Some(path) = pick_image_file() else {
            return;
        };
        match SelectedImage::from_path(&path) {
            Ok(image) => self.select_image(ctx, slot, image),
            Err(err) => self.reject_upload(err.to_string()),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (dropped, pointer) = ctx.input(|i| (i.raw.dropped_files.clone(), i.pointer.latest_pos()));
        if dropped.is_empty() || self.state.view() != AppView::Upload || self.state.is_processing() {
            return;
        }
        if dropped.len() > 1 {
            tracing::debug!(count = dropped.len(), "only the first dropped file is used");
        }
        let Some(file) = dropped.first() else {
            return;
        };
        let slot = pick_drop_slot(pointer, &self.drop_zones, |slot| {
            self.state.image(slot).is_some()
        });
        match image_from_dropped_file(file) {
            Ok(image) => self.select_image(ctx, slot, image),
            Err(err) => self.reject_upload(err.to_string()),
        }
    }

    fn submit(&mut self) {
        let Some(cmd) = self.state.begin_submit() else {
            if self.state.error() == Some(MISSING_IMAGES_MESSAGE) {
                self.error_context = UiErrorContext::Upload;
            }
            return;
        };
        self.status = "Processing images...".to_string();
        if !dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.error_context = UiErrorContext::General;
            self.state.abort_submit(self.status.clone());
        }
    }

    fn retry_health(&mut self) {
        self.status = "Checking backend...".to_string();
        dispatch_backend_command(&self.cmd_tx, BackendCommand::CheckHealth, &mut self.status);
    }

    fn reset(&mut self) {
        self.state.apply(Action::Reset);
        self.previews.clear();
        self.result_image = ResultImage::Loading;
        self.fullscreen = false;
        self.error_context = UiErrorContext::General;
        self.status = "Ready for new images".to_string();
    }

    fn set_fullscreen(&mut self, ctx: &egui::Context, fullscreen: bool) {
        self.fullscreen = fullscreen;
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
    }

    fn save_result_image(&mut self) {
        let Some(bytes) = self.result_image.original_bytes() else {
            return;
        };
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(DEFAULT_DOWNLOAD_NAME)
            .save_file()
        {
            self.status = match write_image(&path, bytes) {
                Ok(()) => format!("Saved image to {}", path.display()),
                Err(err) => format!("Failed to save image: {err}"),
            };
        }
    }

    fn copy_result_image(&mut self) {
        let Some(bytes) = self.result_image.original_bytes() else {
            return;
        };
        self.status = match copy_image_to_clipboard(bytes) {
            Ok(()) => "Copied result image to clipboard".to_string(),
            Err(err) => format!("Failed to copy result image: {err}"),
        };
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::NONE
                    .fill(theme::CARD_BACKGROUND)
                    .inner_margin(egui::Margin::symmetric(10, 4)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&self.status).small().color(theme::MUTED_TEXT));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(&self.backend_url)
                                .small()
                                .color(theme::MUTED_TEXT),
                        );
                    });
                });
            });
    }

    fn show_error_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(err) = self.startup_error.clone() {
            banner(ui, &err, None);
            ui.add_space(8.0);
        }
        if let Some(message) = self.state.error() {
            let err = UiError::from_message(self.error_context, message);
            let mut dismissed = false;
            banner(ui, &err, Some(&mut dismissed));
            if dismissed {
                self.state.apply(Action::DismissError);
            }
            ui.add_space(8.0);
        }
    }

    fn show_backend_status(&mut self, ui: &mut egui::Ui) {
        let status = self.state.backend_status;
        ui.horizontal(|ui| {
            ui.label("Backend Status:");
            ui.label(
                egui::RichText::new(status.label())
                    .strong()
                    .color(theme::status_color(status)),
            );
            if status == BackendStatus::Offline && ui.link("Retry").clicked() {
                self.retry_health();
            }
            if let Some(checked_at) = self.last_health_check {
                ui.label(
                    egui::RichText::new(format!("(checked {})", checked_at.format("%H:%M:%S")))
                        .small()
                        .color(theme::MUTED_TEXT),
                );
            }
        });
    }

    fn show_upload_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(900.0);
                    self.show_backend_status(ui);
                    ui.add_space(12.0);
                    ui.heading(egui::RichText::new("Virtual Clothing Try-On").size(28.0).strong());
                    ui.label(egui::RichText::new(INTRO_TEXT).color(theme::MUTED_TEXT));
                    ui.add_space(16.0);
                });

                let files_hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
                let enabled = !self.state.is_processing();
                let mut clicked_slot = None;
                let mut zones = Vec::with_capacity(ImageSlot::ALL.len());
                ui.columns(ImageSlot::ALL.len(), |columns| {
                    for (column, slot) in columns.iter_mut().zip(ImageSlot::ALL) {
                        let response = show_upload_slot(
                            column,
                            slot,
                            self.state.image(slot),
                            self.previews.get(&slot),
                            files_hovering,
                            enabled,
                        );
                        zones.push((slot, response.rect));
                        if response.clicked() {
                            clicked_slot = Some(slot);
                        }
                    }
                });
                self.drop_zones = zones;
                if let Some(slot) = clicked_slot {
                    self.pick_file_for(ctx, slot);
                }

                ui.add_space(16.0);
                self.show_error_banner(ui);

                ui.vertical_centered(|ui| {
                    let label = if self.state.is_processing() {
                        "Processing..."
                    } else {
                        "Try It On"
                    };
                    let button = egui::Button::new(egui::RichText::new(label).size(16.0))
                        .min_size(egui::vec2(160.0, 40.0))
                        .fill(theme::ACCENT);
                    let clicked = ui.add_enabled(self.state.can_submit(), button).clicked();
                    if self.state.is_processing() {
                        ui.add(egui::Spinner::new());
                    }
                    if clicked {
                        self.submit();
                    }
                    if !self.state.backend_status.is_connected() {
                        ui.label(
                            egui::RichText::new("Please wait for the backend to be available")
                                .color(theme::status_color(BackendStatus::Offline)),
                        );
                    }
                });
            });
        });

        if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.submit();
        }
    }

    fn show_result_page(&mut self, ctx: &egui::Context) {
        let Some(response) = self.state.result().cloned() else {
            return;
        };
        if self.fullscreen {
            if show_fullscreen(ctx, &self.result_image) {
                self.set_fullscreen(ctx, false);
            }
            return;
        }

        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            action = show_result_view(ui, &response, &self.result_image);
        });

        match action {
            Some(ResultAction::TryAnother) => self.reset(),
            Some(ResultAction::Download) => self.save_result_image(),
            Some(ResultAction::CopyImage) => self.copy_result_image(),
            Some(ResultAction::EnterFullscreen) => self.set_fullscreen(ctx, true),
            Some(ResultAction::RetryImage) => self.request_result_image(response.result_url),
            None => {}
        }
    }
}

fn write_image(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    fs::write(path, bytes)
}

fn banner(ui: &mut egui::Ui, err: &UiError, dismissed: Option<&mut bool>) {
    let (fill, stroke) = theme::banner_colors(err.category());
    egui::Frame::NONE
        .fill(fill)
        .stroke(stroke)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(err.message()).color(egui::Color32::WHITE));
                if let Some(dismissed) = dismissed {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            *dismissed = true;
                        }
                    });
                }
            });
        });
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            theme::apply(ctx);
            self.theme_applied = true;
        }

        self.process_ui_events(ctx);
        self.handle_dropped_files(ctx);

        if !self.fullscreen {
            self.show_status_bar(ctx);
        }
        match self.state.view() {
            AppView::Upload => self.show_upload_view(ctx),
            AppView::Result => self.show_result_page(ctx),
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
