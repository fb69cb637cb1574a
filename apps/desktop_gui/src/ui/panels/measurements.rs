//! Size and body-type readout for a processed result.

use eframe::egui;
use shared::{domain::MeasurementSummary, protocol::Measurements};

use crate::ui::theme;

const ABOUT_MEASUREMENTS: &str = "Measurements are calculated using AI-powered body detection. \
For the most accurate results, wear fitted clothing in your photo and stand straight with \
arms slightly away from your body.";

pub fn show_measurements(ui: &mut egui::Ui, measurements: Measurements) {
    let summary = match MeasurementSummary::from_measurements(measurements) {
        Ok(summary) => summary,
        Err(err) => {
            tracing::warn!(?measurements, "measurements are missing or not finite");
            ui.label(egui::RichText::new(err.to_string()).color(egui::Color32::from_rgb(240, 71, 71)));
            return;
        }
    };

    card(ui, |ui| {
        ui.label(egui::RichText::new("Recommended Size").size(18.0).strong());
        ui.label(
            egui::RichText::new(summary.size.as_str())
                .size(40.0)
                .strong()
                .color(theme::ACCENT),
        );
        ui.label(egui::RichText::new("Based on your measurements").color(theme::MUTED_TEXT));

        ui.add_space(10.0);
        ui.label(egui::RichText::new("Body Type").size(15.0).strong());
        ui.label(summary.body_type.as_str());

        ui.add_space(10.0);
        ui.label(egui::RichText::new("Detailed Measurements").size(15.0).strong());
        egui::Grid::new("measurement_rows")
            .num_columns(2)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                for (label, value) in summary.detail_rows() {
                    ui.label(egui::RichText::new(label).color(theme::MUTED_TEXT));
                    ui.label(egui::RichText::new(value).strong());
                    ui.end_row();
                }
            });

        ui.add_space(10.0);
        ui.label(egui::RichText::new("Fit Tips").size(15.0).strong());
        for tip in summary.fit_tips() {
            ui.label(format!("• {tip}"));
        }
    });

    ui.add_space(12.0);
    notice(ui, "About Measurements", ABOUT_MEASUREMENTS);
}

pub(crate) fn card(ui: &mut egui::Ui, add: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::NONE
        .fill(theme::CARD_BACKGROUND)
        .stroke(egui::Stroke::new(1.0, theme::CARD_STROKE))
        .corner_radius(10.0)
        .inner_margin(egui::Margin::same(14))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add(ui);
        });
}

pub(crate) fn notice(ui: &mut egui::Ui, title: &str, body: &str) {
    card(ui, |ui| {
        ui.label(egui::RichText::new(title).strong());
        ui.label(egui::RichText::new(body).color(theme::MUTED_TEXT));
    });
}
