//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{run_effect, AkinatorApi, ClientSettings, HttpGateway};
use crossbeam_channel::{Receiver, Sender};
use reqwest::Client as HttpClient;

use crate::backend_bridge::{commands::BackendCommand, images::fetch_preview_image};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Blocks while the UI queue is full; backend results are never dropped.
fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if ui_tx.send(event).is_err() {
        tracing::warn!("ui event channel closed; dropping backend result");
    }
}

/// Starts the worker thread. Each command runs as its own task; responses
/// arriving out of order are filtered by the session's request tags.
pub fn launch(settings: ClientSettings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
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
            let gateway = match HttpGateway::from_settings(&settings) {
                Ok(gateway) => gateway,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err}"),
                    )));
                    tracing::error!(base_url = %settings.base_url, "invalid backend settings: {err}");
                    return;
                }
            };
            let connected = format!("Connected to {}", gateway.base_url());
            let api = AkinatorApi::new(Arc::new(gateway));
            let images = match HttpClient::builder()
                .timeout(settings.request_timeout())
                .build()
            {
                Ok(client) => client,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: image client: {err}"),
                    )));
                    return;
                }
            };
            let _ = ui_tx.try_send(UiEvent::Info(connected));

            while let Ok(cmd) = cmd_rx.recv() {
                let ui_tx = ui_tx.clone();
                match cmd {
                    BackendCommand::Execute(effect) => {
                        let api = api.clone();
                        tokio::spawn(async move {
                            let event = run_effect(&api, effect).await;
                            deliver(&ui_tx, UiEvent::Session(event));
                        });
                    }
                    BackendCommand::FetchImage { url } => {
                        let http = images.clone();
                        tokio::spawn(async move {
                            let event = match fetch_preview_image(&http, &url).await {
                                Ok(image) => UiEvent::ImageLoaded { url, image },
                                Err(reason) => {
                                    tracing::debug!(url = %url, "image preview failed: {reason}");
                                    UiEvent::ImageFailed { url, reason }
                                }
                            };
                            deliver(&ui_tx, event);
                        });
                    }
                }
            }
            tracing::info!("backend command channel closed; worker exiting");
        });
    });
}
