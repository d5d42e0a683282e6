mod backend_bridge;
mod controller;
mod ui;

use std::{sync::Arc, time::Duration};

use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::controller::events::UiEvent;
use crate::ui::WordleApp;

#[derive(Parser, Debug)]
#[command(name = "wordle-gui", about = "Desktop front end for the word-guessing assistant")]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    timeout_ms: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(ms) = args.timeout_ms.filter(|ms| *ms > 0) {
        settings.request_timeout = Duration::from_millis(ms);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let controller = Arc::new(client_core::connect(&settings)?);
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Wordle Assistant")
            .with_inner_size([720.0, 560.0])
            .with_min_inner_size([560.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Wordle Assistant",
        options,
        Box::new(move |cc| {
            runtime::launch(Arc::clone(&controller), cmd_rx, ui_tx, cc.egui_ctx.clone());
            Ok(Box::new(WordleApp::new(controller, cmd_tx, ui_rx)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("gui exited with error: {err}"))
}
