use std::time::Duration;

use client_core::{GameView, Phase};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::COLS;

use crate::backend_bridge::{commands::BackendCommand, runtime::SharedController};
use crate::controller::{
    events::{UiErrorCategory, UiEvent},
    orchestration::dispatch_backend_command,
};
use crate::ui::theme::{tile_fill, tile_text, TILE_GAP, TILE_SIZE};

pub struct WordleApp {
    controller: SharedController,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    inject_input: String,
}

impl WordleApp {
    pub fn new(
        controller: SharedController,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let mut app = Self {
            controller,
            cmd_tx,
            ui_rx,
            status: "Loading session...".to_string(),
            inject_input: String::new(),
        };
        app.queue(BackendCommand::Restore);
        app
    }

    fn queue(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::Error(err) => {
                    let prefix = match err.category() {
                        UiErrorCategory::Transport => "Server unreachable",
                        UiErrorCategory::Validation => "Not accepted",
                        UiErrorCategory::Unknown => "Error",
                    };
                    tracing::warn!(context = ?err.context(), "{}", err.message());
                    self.status = format!("{prefix}: {}", err.message());
                }
            }
        }
    }

    fn inject(&mut self, word: String) {
        let word = word.trim().to_string();
        self.inject_input.clear();
        if !word.is_empty() {
            self.queue(BackendCommand::Inject { word });
        }
    }

    fn show_grid(&mut self, ui: &mut egui::Ui, view: &GameView) {
        ui.spacing_mut().item_spacing = egui::vec2(TILE_GAP, TILE_GAP);
        for (row_index, row) in view.grid.rows().iter().enumerate() {
            ui.horizontal(|ui| {
                for (col, tile) in row.iter().enumerate().take(COLS) {
                    let letter = tile.letter.map(String::from).unwrap_or_default();
                    let has_letter = tile.letter.is_some();
                    let button = egui::Button::new(
                        egui::RichText::new(letter)
                            .size(28.0)
                            .strong()
                            .color(tile_text(has_letter)),
                    )
                    .fill(tile_fill(tile.mark, has_letter))
                    .min_size(egui::vec2(TILE_SIZE, TILE_SIZE));
                    // Tile clicks are local; the controller ignores rows other than the active one.
                    if ui.add(button).clicked() {
                        self.controller.cycle_mark(row_index, col);
                    }
                }
            });
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui, view: &GameView) {
        ui.horizontal(|ui| {
            if ui.button("New game").clicked() {
                self.queue(BackendCommand::NewGame);
            }
            if ui
                .add_enabled(view.switch_enabled, egui::Button::new("Switch"))
                .clicked()
            {
                self.queue(BackendCommand::Switch);
            }
            if ui
                .add_enabled(view.submit_enabled, egui::Button::new("Submit"))
                .clicked()
            {
                self.queue(BackendCommand::Submit);
            }
            if view.busy {
                ui.add(egui::Spinner::new());
            }
        });

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.inject_input)
                    .hint_text("your own word")
                    .desired_width(120.0),
            );
            let submitted =
                response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
            if ui.button("Inject").clicked() || submitted {
                let word = std::mem::take(&mut self.inject_input);
                self.inject(word);
            }
        });
    }

    fn show_panels(&mut self, ui: &mut egui::Ui, view: &GameView) {
        let panels = &view.panels;
        match &view.phase {
            Phase::Empty => {
                ui.label("No session yet");
                return;
            }
            Phase::Solved { answer } => {
                ui.heading(format!("Solved: {answer}"));
            }
            Phase::Exhausted => {
                ui.heading("Out of guesses");
            }
            Phase::AwaitingFeedback => {
                ui.heading(panels.guess_label());
            }
        }
        ui.label(panels.entropy_label());
        ui.label(format!("Remaining: {}", panels.remaining_count));
        if let Some(top) = panels.top_remaining_label() {
            ui.label(format!("Best remaining: {top}"));
        }

        let words = panels.remaining_words();
        if words.is_empty() {
            return;
        }
        let mut picked = None;
        egui::ScrollArea::vertical()
            .max_height(240.0)
            .show(ui, |ui| {
                for word in words {
                    if ui.selectable_label(false, word.as_str()).clicked() {
                        picked = Some(word.clone());
                    }
                }
            });
        if let Some(word) = picked {
            self.inject(word);
        }
    }
}

impl eframe::App for WordleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        let view = self.controller.view();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });
        egui::SidePanel::right("session_panels")
            .min_width(220.0)
            .show(ctx, |ui| self.show_panels(ui, &view));
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_grid(ui, &view);
            ui.add_space(12.0);
            self.show_controls(ui, &view);
        });

        if view.in_flight.is_some() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
