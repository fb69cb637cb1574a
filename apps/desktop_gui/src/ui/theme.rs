//! Colors and visuals for the try-on window.

use client_core::BackendStatus;
use eframe::egui;

use crate::controller::events::UiErrorCategory;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(88, 101, 242);
pub const APP_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(26, 26, 30);
pub const CARD_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(36, 36, 40);
pub const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(58, 60, 70);
pub const TEXT: egui::Color32 = egui::Color32::from_rgb(239, 239, 241);
pub const MUTED_TEXT: egui::Color32 = egui::Color32::from_rgb(129, 130, 138);

const CONNECTED: egui::Color32 = egui::Color32::from_rgb(35, 165, 90);
const OFFLINE: egui::Color32 = egui::Color32::from_rgb(240, 71, 71);
const CHECKING: egui::Color32 = egui::Color32::from_rgb(250, 166, 26);

pub fn status_color(status: BackendStatus) -> egui::Color32 {
    match status {
        BackendStatus::Checking => CHECKING,
        BackendStatus::Connected => CONNECTED,
        BackendStatus::Offline => OFFLINE,
    }
}

/// Fill and stroke for the inline error banner.
pub fn banner_colors(category: UiErrorCategory) -> (egui::Color32, egui::Stroke) {
    match category {
        UiErrorCategory::Validation => (
            egui::Color32::from_rgb(92, 72, 34),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(180, 140, 60)),
        ),
        UiErrorCategory::Transport | UiErrorCategory::Backend | UiErrorCategory::Unknown => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
        ),
    }
}

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = APP_BACKGROUND;
    visuals.window_fill = CARD_BACKGROUND;
    visuals.override_text_color = Some(TEXT);
    visuals.selection.bg_fill = ACCENT;
    visuals.hyperlink_color = lighten_color(ACCENT, 0.3);
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_color_blends_toward_white() {
        let base = egui::Color32::from_rgb(100, 0, 200);
        assert_eq!(lighten_color(base, 0.0), base);
        assert_eq!(lighten_color(base, 1.0), egui::Color32::WHITE);
        assert_eq!(
            lighten_color(base, 0.5),
            egui::Color32::from_rgb(178, 128, 228)
        );
        assert_eq!(lighten_color(base, 7.0), egui::Color32::WHITE);
    }

    #[test]
    fn each_backend_status_has_its_own_color() {
        let checking = status_color(BackendStatus::Checking);
        let connected = status_color(BackendStatus::Connected);
        let offline = status_color(BackendStatus::Offline);
        assert_ne!(checking, connected);
        assert_ne!(connected, offline);
        assert_ne!(checking, offline);
    }
}
