use std::fmt::Write as _;

use client_core::{ActionOutcome, GameView, IgnoreReason, Phase, Tile};
use shared::domain::MarkState;

/// Remaining words printed before the list is elided.
const REMAINING_PREVIEW: usize = 20;

fn tile_cell(tile: &Tile) -> String {
    let letter = tile.letter.unwrap_or('.');
    let mark = match tile.mark {
        MarkState::Unset => ' ',
        MarkState::Present => '?',
        MarkState::Correct => '*',
    };
    format!("[{letter}{mark}]")
}

pub fn render_view(view: &GameView) -> String {
    let mut out = String::new();
    for (index, row) in view.grid.rows().iter().enumerate() {
        let cursor = if index == view.grid.current_row() && !view.phase.is_terminal() {
            '>'
        } else {
            ' '
        };
        let cells: String = row.iter().map(tile_cell).collect();
        let _ = writeln!(out, "{cursor} {} {cells}", index + 1);
    }

    let panels = &view.panels;
    match &view.phase {
        Phase::Empty => {
            let _ = writeln!(out, "no session yet - type 'new'");
            return out;
        }
        Phase::Solved { answer } => {
            let _ = writeln!(out, "solved: {answer}");
        }
        Phase::Exhausted => {
            let _ = writeln!(out, "out of guesses");
        }
        Phase::AwaitingFeedback => {
            let _ = writeln!(out, "{}  ({})", panels.guess_label(), panels.entropy_label());
        }
    }
    let _ = writeln!(out, "remaining: {}", panels.remaining_count);
    if let Some(top) = panels.top_remaining_label() {
        let _ = writeln!(out, "best remaining: {top}");
    }
    let words = panels.remaining_words();
    if !words.is_empty() {
        let shown: Vec<&str> = words
            .iter()
            .take(REMAINING_PREVIEW)
            .map(String::as_str)
            .collect();
        let more = words.len().saturating_sub(REMAINING_PREVIEW);
        let suffix = if more > 0 {
            format!(" (+{more} more)")
        } else {
            String::new()
        };
        let _ = writeln!(out, "candidates: {}{suffix}", shown.join(" "));
    }
    if view.switch_enabled {
        let _ = writeln!(out, "'switch' cycles {} suggestions", panels.suggestions.len());
    }
    out
}

/// One-line summary of an action; `None` when the redrawn board says it all.
pub fn describe_outcome(outcome: &ActionOutcome) -> Option<String> {
    match outcome {
        ActionOutcome::Applied => None,
        ActionOutcome::Solved { answer } => Some(format!("the answer is {answer}")),
        ActionOutcome::Rejected { reason } => Some(format!(
            "word rejected: {}",
            reason.as_deref().unwrap_or("not usable")
        )),
        ActionOutcome::Ignored(reason) => Some(
            match reason {
                IgnoreReason::Busy(op) => format!("still waiting on {op}"),
                IgnoreReason::NoActiveRow => "no active game - type 'new'".to_string(),
                IgnoreReason::GameOver => "this game is over - type 'new'".to_string(),
                IgnoreReason::SwitchUnavailable => {
                    "no alternative suggestion for this guess".to_string()
                }
                IgnoreReason::EmptyWord => "nothing to inject".to_string(),
                IgnoreReason::Stale => "reply arrived for an old game".to_string(),
            },
        ),
        ActionOutcome::Failed(err) => Some(format!("request failed: {err}")),
    }
}
