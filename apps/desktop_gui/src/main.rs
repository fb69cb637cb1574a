mod backend_bridge;
mod controller;
mod media;
mod ui;

use clap::Parser;
use client_core::config::{load_settings, normalize_backend_url};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{DesktopGuiApp, StartupConfig};

const APP_TITLE: &str = "Virtual Clothing Try-On";

#[derive(Parser, Debug)]
#[command(about = "Desktop client for the virtual try-on backend")]
struct Args {
    /// Backend base URL; overrides tryon.toml and the environment.
    #[arg(long)]
    backend_url: Option<String>,
    /// Seconds between background health checks.
    #[arg(long)]
    health_interval_secs: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(backend_url) = args.backend_url {
        settings.backend_url = normalize_backend_url(&backend_url)?;
    }
    if let Some(secs) = args.health_interval_secs {
        settings.health_interval_secs = secs;
    }
    tracing::info!(
        backend_url = %settings.backend_url,
        health_interval_secs = settings.health_interval_secs,
        "starting desktop gui"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let startup = StartupConfig {
        backend_url: settings.backend_url.clone(),
    };
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([760.0, 560.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run desktop gui: {err}"))
}
