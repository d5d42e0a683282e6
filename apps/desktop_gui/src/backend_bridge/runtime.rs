//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ActionOutcome, HttpSessionService, SessionController};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{describe_outcome, UiError, UiErrorContext, UiEvent};

pub type SharedController = Arc<SessionController<HttpSessionService>>;

pub fn launch(
    controller: SharedController,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    repaint: egui::Context,
) {
    thread::spawn(move || {
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
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            // Each command runs as its own task so a second submit reaches the
            // controller (and its in-flight guard) instead of queueing behind the first.
            while let Ok(cmd) = cmd_rx.recv() {
                let controller = Arc::clone(&controller);
                let ui_tx = ui_tx.clone();
                let task_repaint = repaint.clone();
                tokio::spawn(async move {
                    let name = cmd.name();
                    let outcome = run_command(&controller, cmd).await;
                    tracing::debug!(command = name, ?outcome, "backend command finished");
                    if let Some(event) = describe_outcome(name, &outcome) {
                        let _ = ui_tx.try_send(event);
                    }
                    task_repaint.request_repaint();
                });
                repaint.request_repaint();
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

async fn run_command(controller: &SharedController, cmd: BackendCommand) -> ActionOutcome {
    match cmd {
        BackendCommand::Restore => controller.restore().await,
        BackendCommand::NewGame => controller.start_new_game().await,
        BackendCommand::Switch => controller.switch_suggestion().await,
        BackendCommand::Inject { word } => controller.inject_word(&word).await,
        BackendCommand::Submit => controller.submit_feedback().await,
    }
}
