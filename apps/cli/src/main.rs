mod commands;
mod render;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_settings, ActionOutcome, HttpSessionService, SessionController};
use shared::domain::{FeedbackVector, COLS};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::commands::{parse_command, Command, HELP};
use crate::render::{describe_outcome, render_view};

#[derive(Parser, Debug)]
#[command(name = "wordle-cli", about = "Terminal front end for the word-guessing assistant")]
struct Args {
    /// Session service base URL (overrides wordle.toml and APP__SERVER_URL).
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    timeout_ms: Option<u64>,
    #[arg(long)]
    log_filter: Option<String>,
    /// Start a new game instead of resuming the service's current one.
    #[arg(long)]
    fresh: bool,
}

type Controller = SessionController<HttpSessionService>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(ms) = args.timeout_ms.filter(|ms| *ms > 0) {
        settings.request_timeout = Duration::from_millis(ms);
    }
    if let Some(filter) = args.log_filter {
        settings.log_filter = filter;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let controller = client_core::connect(&settings)
        .with_context(|| format!("failed to set up session client for {}", settings.server_url))?;
    tracing::info!(server_url = %settings.server_url, "connecting to session service");

    let outcome = if args.fresh {
        controller.start_new_game().await
    } else {
        controller.restore().await
    };
    report(&controller, &outcome);
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        let outcome = match command {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Show => {
                print!("{}", render_view(&controller.view()));
                continue;
            }
            Command::Mark(col) => {
                let row = controller.current_row();
                if !controller.cycle_mark(row, col) {
                    println!("no active row to mark");
                }
                print!("{}", render_view(&controller.view()));
                continue;
            }
            Command::Feedback(target) => {
                apply_feedback(&controller, target);
                print!("{}", render_view(&controller.view()));
                continue;
            }
            Command::New => controller.start_new_game().await,
            Command::Switch => controller.switch_suggestion().await,
            Command::Inject(word) => controller.inject_word(&word).await,
            Command::Submit => controller.submit_feedback().await,
        };
        report(&controller, &outcome);
    }
    Ok(())
}

/// Cycles each tile of the active row until it shows the requested mark.
fn apply_feedback(controller: &Controller, target: FeedbackVector) {
    let view = controller.view();
    let row = view.grid.current_row();
    for (col, wanted) in target.into_iter().enumerate().take(COLS) {
        let Some(tile) = view.grid.tile(row, col) else {
            println!("no active row to mark");
            return;
        };
        let mut mark = tile.mark;
        while mark != wanted {
            if !controller.cycle_mark(row, col) {
                println!("no active row to mark");
                return;
            }
            mark = mark.next();
        }
    }
}

fn report(controller: &Controller, outcome: &ActionOutcome) {
    print!("{}", render_view(&controller.view()));
    if let Some(message) = describe_outcome(outcome) {
        println!("{message}");
    }
}
