//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use chrono::Local;
use client_core::{BackendApi, ClientSettings, HealthMonitor, HealthMonitorHandle, TryOnClient};
use crossbeam_channel::{Receiver, Sender};
use shared::upload::SelectedImage;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::media::{decode_preview_image, RESULT_PREVIEW_MAX_DIMENSION};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || run_worker(cmd_rx, ui_tx, settings));
}

fn run_worker(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: failed to build runtime: {err}"),
            )));
            tracing::error!("failed to build backend runtime: {err}");
            return;
        }
    };

    runtime.block_on(async move {
        let api = match TryOnClient::from_settings(&settings) {
            Ok(client) => client.into_shared(),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err}"),
                )));
                tracing::error!("failed to build backend client: {err}");
                return;
            }
        };

        let monitor = HealthMonitor::spawn(Arc::clone(&api), settings.health_interval());
        let mut status_rx = monitor.subscribe();
        let status_ui_tx = ui_tx.clone();
        let status_task = tokio::spawn(async move {
            while status_rx.changed().await.is_ok() {
                let status = *status_rx.borrow_and_update();
                let _ = status_ui_tx.try_send(UiEvent::BackendStatusChanged {
                    status,
                    checked_at: Local::now(),
                });
            }
        });

        tracing::info!(backend_url = %settings.backend_url, "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Using backend at {}",
            settings.backend_url
        )));

        while let Ok(cmd) = cmd_rx.recv() {
            handle_command(cmd, &api, &monitor, &ui_tx);
        }

        tracing::info!("backend: command queue closed, stopping worker");
        status_task.abort();
    });
}

/// Starts the work for one command without waiting for it, so a slow
/// submission never holds up a manual health check.
pub(crate) fn handle_command(
    cmd: BackendCommand,
    api: &Arc<dyn BackendApi>,
    monitor: &HealthMonitorHandle,
    ui_tx: &Sender<UiEvent>,
) {
    tracing::debug!(command = cmd.name(), "backend: received command");
    let ui_tx = ui_tx.clone();
    match cmd {
        BackendCommand::CheckHealth => {
            tracing::info!("backend: manual health check");
            let reply = monitor.check_now();
            tokio::spawn(async move {
                match reply.await {
                    Ok(status) => {
                        let _ = ui_tx.try_send(UiEvent::HealthChecked {
                            status,
                            checked_at: Local::now(),
                        });
                    }
                    Err(_) => tracing::warn!("backend: health monitor stopped before replying"),
                }
            });
        }
        BackendCommand::ProcessImages {
            user_image,
            clothing_image,
        } => {
            let api = Arc::clone(api);
            tokio::spawn(async move {
                process_images(api.as_ref(), &user_image, &clothing_image, &ui_tx).await;
            });
        }
        BackendCommand::FetchResultImage { result_url } => {
            let api = Arc::clone(api);
            tokio::spawn(async move {
                fetch_result_image(api.as_ref(), result_url, &ui_tx).await;
            });
        }
    }
}

pub(crate) async fn process_images(
    api: &dyn BackendApi,
    user_image: &SelectedImage,
    clothing_image: &SelectedImage,
    ui_tx: &Sender<UiEvent>,
) {
    tracing::info!(
        user_image = %user_image.file_name,
        clothing_image = %clothing_image.file_name,
        "backend: process_images"
    );
    let event = match api.process_images(user_image, clothing_image).await {
        Ok(response) => UiEvent::ProcessSucceeded(response),
        Err(err) => {
            tracing::error!("backend: process_images failed: {err}");
            UiEvent::ProcessFailed(UiError::from_message(
                UiErrorContext::Submit,
                err.user_message(),
            ))
        }
    };
    let _ = ui_tx.try_send(event);
}

pub(crate) async fn fetch_result_image(
    api: &dyn BackendApi,
    result_url: String,
    ui_tx: &Sender<UiEvent>,
) {
    tracing::info!(result_url = %result_url, "backend: fetch_result_image");
    let event = match api.fetch_result_image(&result_url).await {
        Ok(bytes) => match decode_preview_image(&bytes, RESULT_PREVIEW_MAX_DIMENSION) {
            Ok(image) => UiEvent::ResultImageLoaded {
                result_url,
                image,
                original_bytes: bytes,
            },
            Err(reason) => {
                tracing::warn!(result_url = %result_url, "result image could not be decoded: {reason}");
                UiEvent::ResultImageFailed { result_url, reason }
            }
        },
        Err(err) => {
            tracing::error!(result_url = %result_url, "backend: fetch_result_image failed: {err}");
            UiEvent::ResultImageFailed {
                result_url,
                reason: format!("Failed to download result image: {}", err.user_message()),
            }
        }
    };
    let _ = ui_tx.try_send(event);
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
