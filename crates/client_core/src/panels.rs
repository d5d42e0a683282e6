//! Read-only panel state derived from the latest session snapshot.

use shared::protocol::{SessionSnapshot, TopRemaining};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelState {
    pub step: u32,
    pub current_guess: String,
    pub current_entropy: f64,
    pub remaining_count: u32,
    pub suggestions: Vec<String>,
    pub top_remaining: Option<TopRemaining>,
    pub remaining_sorted: Vec<String>,
}

impl PanelState {
    /// Replaces every field; nothing from the previous snapshot survives.
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self {
            step: snapshot.step,
            current_guess: snapshot.current_guess.to_uppercase(),
            current_entropy: snapshot.current_entropy,
            remaining_count: snapshot.remaining_count,
            suggestions: snapshot.suggestions.clone(),
            top_remaining: snapshot.top_remaining.clone(),
            remaining_sorted: snapshot.remaining_sorted.clone(),
        }
    }

    /// The opening guess is fixed, so switching only makes sense from step 2 on.
    pub fn switch_enabled(&self) -> bool {
        self.suggestions.len() > 1 && self.step > 1
    }

    pub fn guess_label(&self) -> String {
        format!("Guess: {}", self.current_guess)
    }

    pub fn entropy_label(&self) -> String {
        format!("{:.2} bits", self.current_entropy)
    }

    pub fn top_remaining_label(&self) -> Option<String> {
        self.top_remaining
            .as_ref()
            .map(|top| format!("{} - {:.2}", top.word.to_uppercase(), top.entropy))
    }

    /// Ranked remaining words; shown only once the service ranks them.
    pub fn remaining_words(&self) -> &[String] {
        if self.top_remaining.is_some() {
            &self.remaining_sorted
        } else {
            &[]
        }
    }
}
