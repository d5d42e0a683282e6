//! Session controller: sequences session requests and reconciles replies into the grid.

use std::{
    fmt,
    future::Future,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use shared::{
    domain::{MarkState, Word, ROWS},
    protocol::SessionSnapshot,
};
use tracing::{debug, info, warn};

use crate::{
    grid::{Grid, GridError},
    panels::PanelState,
    service::{InjectReply, ServiceError, SessionService},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Restore,
    NewGame,
    Switch,
    Inject,
    Submit,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Restore => "restore",
            Operation::NewGame => "new_game",
            Operation::Switch => "switch",
            Operation::Inject => "inject",
            Operation::Submit => "submit",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Grid reset, no session state reconciled yet.
    Empty,
    AwaitingFeedback,
    Solved { answer: String },
    /// Every row used without the service reporting an answer.
    Exhausted,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Solved { .. } | Phase::Exhausted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Busy(Operation),
    NoActiveRow,
    GameOver,
    SwitchUnavailable,
    EmptyWord,
    /// A newer game started while the request was outstanding.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Applied,
    Solved { answer: String },
    Rejected { reason: Option<String> },
    Ignored(IgnoreReason),
    Failed(ServiceError),
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub grid: Grid,
    pub phase: Phase,
    pub panels: PanelState,
    pub in_flight: Option<Operation>,
    /// True exactly while a submission is outstanding.
    pub busy: bool,
    pub submit_enabled: bool,
    pub switch_enabled: bool,
}

#[derive(Debug)]
struct ControllerState {
    grid: Grid,
    phase: Phase,
    panels: PanelState,
    in_flight: Option<Operation>,
    generation: u64,
}

impl ControllerState {
    fn new() -> Self {
        Self {
            grid: Grid::new(),
            phase: Phase::Empty,
            panels: PanelState::default(),
            in_flight: None,
            generation: 0,
        }
    }

    fn clear_board(&mut self) {
        self.generation += 1;
        self.grid.reset();
        self.panels = PanelState::default();
        self.phase = Phase::Empty;
        self.in_flight = None;
    }

    fn require_active_row(&self) -> Result<(), IgnoreReason> {
        match self.phase {
            Phase::Empty => Err(IgnoreReason::NoActiveRow),
            Phase::Solved { .. } | Phase::Exhausted => Err(IgnoreReason::GameOver),
            Phase::AwaitingFeedback if self.grid.current_row() >= ROWS => {
                Err(IgnoreReason::GameOver)
            }
            Phase::AwaitingFeedback => Ok(()),
        }
    }

    fn require_idle(&self) -> Result<(), IgnoreReason> {
        match self.in_flight {
            Some(op) => Err(IgnoreReason::Busy(op)),
            None => Ok(()),
        }
    }

    fn view(&self) -> GameView {
        let idle = self.in_flight.is_none();
        let active = self.require_active_row().is_ok();
        GameView {
            grid: self.grid.clone(),
            phase: self.phase.clone(),
            panels: self.panels.clone(),
            in_flight: self.in_flight,
            busy: self.in_flight == Some(Operation::Submit),
            submit_enabled: idle && active,
            switch_enabled: idle && active && self.panels.switch_enabled(),
        }
    }

    /// Writes a validated snapshot into the grid and panels. All validation
    /// happens before the first mutation.
    fn reconcile(
        &mut self,
        snapshot: &SessionSnapshot,
        reveal: Option<(usize, Word)>,
    ) -> Result<ActionOutcome, ServiceError> {
        let guess = snapshot.validate()?;
        self.panels = PanelState::from_snapshot(snapshot);

        if let Some((row, answer)) = reveal {
            if row < ROWS {
                self.grid
                    .set_row_word(row, &answer, MarkState::Correct)
                    .map_err(grid_fault)?;
            }
            self.grid.advance_current_row(ROWS).map_err(grid_fault)?;
            let answer = answer.to_string();
            info!(%answer, step = snapshot.step, "puzzle solved");
            self.phase = Phase::Solved {
                answer: answer.clone(),
            };
            return Ok(ActionOutcome::Solved { answer });
        }

        let row = snapshot.step.saturating_sub(1) as usize;
        if row < ROWS {
            self.grid.advance_current_row(row).map_err(grid_fault)?;
            self.grid
                .set_row_word(row, &guess, MarkState::Unset)
                .map_err(grid_fault)?;
            self.phase = Phase::AwaitingFeedback;
        } else {
            self.grid.advance_current_row(ROWS).map_err(grid_fault)?;
            info!(step = snapshot.step, "out of rows without an answer");
            self.phase = Phase::Exhausted;
        }
        Ok(ActionOutcome::Applied)
    }
}

fn grid_fault(err: GridError) -> ServiceError {
    ServiceError::Decode(err.to_string())
}

fn lock(state: &Mutex<ControllerState>) -> MutexGuard<'_, ControllerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the in-flight slot; releasing it on drop covers errors, timeouts and
/// cancelled futures alike.
struct InFlight<'a> {
    state: &'a Mutex<ControllerState>,
    generation: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = lock(self.state);
        if state.generation == self.generation {
            state.in_flight = None;
        }
    }
}

pub struct SessionController<S: SessionService> {
    service: S,
    request_timeout: Duration,
    state: Mutex<ControllerState>,
}

impl<S: SessionService> SessionController<S> {
    pub fn new(service: S, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
            state: Mutex::new(ControllerState::new()),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn view(&self) -> GameView {
        lock(&self.state).view()
    }

    pub fn current_row(&self) -> usize {
        lock(&self.state).grid.current_row()
    }

    /// Local, synchronous tile toggle. Only the active row of a running game responds.
    pub fn cycle_mark(&self, row: usize, col: usize) -> bool {
        let mut state = lock(&self.state);
        if state.phase != Phase::AwaitingFeedback {
            return false;
        }
        state.grid.cycle_mark(row, col)
    }

    /// Back to an empty board. Replies to requests issued before this call are dropped.
    pub fn reset(&self) {
        lock(&self.state).clear_board();
    }

    /// Startup path: adopt the service's current session, or start a new one
    /// if it cannot be read.
    pub async fn restore(&self) -> ActionOutcome {
        let guard = match self.begin(Operation::Restore, |state| state.require_idle()) {
            Ok(guard) => guard,
            Err(reason) => return ActionOutcome::Ignored(reason),
        };
        let result = self.call(self.service.fetch_state()).await;
        let outcome = self.finish(&guard, |state| {
            let snapshot = result?;
            state.reconcile(&snapshot, None)
        });
        drop(guard);

        match outcome {
            ActionOutcome::Failed(err) => {
                warn!("could not restore session state, starting a new game: {err}");
                self.start_new_game().await
            }
            other => other,
        }
    }

    pub async fn start_new_game(&self) -> ActionOutcome {
        let generation = {
            let mut state = lock(&self.state);
            state.clear_board();
            state.in_flight = Some(Operation::NewGame);
            state.generation
        };
        let guard = InFlight {
            state: &self.state,
            generation,
        };
        info!("starting new game");

        let result = self.call(self.service.new_game()).await;
        let outcome = self.finish(&guard, |state| {
            let snapshot = result?;
            state.reconcile(&snapshot, None)
        });
        drop(guard);
        outcome
    }

    /// Rotates to the next-ranked suggestion without consuming a turn.
    pub async fn switch_suggestion(&self) -> ActionOutcome {
        let guard = match self.begin(Operation::Switch, |state| {
            state.require_idle()?;
            state.require_active_row()?;
            if state.panels.switch_enabled() {
                Ok(())
            } else {
                Err(IgnoreReason::SwitchUnavailable)
            }
        }) {
            Ok(guard) => guard,
            Err(reason) => return ActionOutcome::Ignored(reason),
        };

        let result = self.call(self.service.switch_suggestion()).await;
        let outcome = self.finish(&guard, |state| {
            let snapshot = result?;
            state.reconcile(&snapshot, None)
        });
        drop(guard);
        outcome
    }

    /// Replaces the current guess with a player-chosen word. A refused word
    /// leaves grid and panels untouched.
    pub async fn inject_word(&self, word: &str) -> ActionOutcome {
        let word = word.trim();
        if word.is_empty() {
            return ActionOutcome::Ignored(IgnoreReason::EmptyWord);
        }
        let guard = match self.begin(Operation::Inject, |state| {
            state.require_idle()?;
            state.require_active_row()
        }) {
            Ok(guard) => guard,
            Err(reason) => return ActionOutcome::Ignored(reason),
        };

        let result = self.call(self.service.inject_word(word)).await;
        let outcome = self.finish(&guard, |state| match result? {
            InjectReply::Accepted(snapshot) => state.reconcile(&snapshot, None),
            InjectReply::Rejected { reason } => {
                info!(%word, ?reason, "service refused injected word");
                Ok(ActionOutcome::Rejected { reason })
            }
        });
        drop(guard);
        outcome
    }

    /// Sends the active row's marks. A second call while one is outstanding is
    /// a no-op.
    pub async fn submit_feedback(&self) -> ActionOutcome {
        let mut submitted = None;
        let guard = match self.begin(Operation::Submit, |state| {
            state.require_active_row()?;
            state.require_idle()?;
            let row = state.grid.current_row();
            submitted = Some((row, state.grid.feedback_vector(row)));
            Ok(())
        }) {
            Ok(guard) => guard,
            Err(reason) => return ActionOutcome::Ignored(reason),
        };
        let Some((row, feedback)) = submitted else {
            return ActionOutcome::Ignored(IgnoreReason::NoActiveRow);
        };
        debug!(row, ?feedback, "submitting feedback");

        let result = self.call(self.service.submit_feedback(feedback)).await;
        let outcome = self.finish(&guard, |state| {
            let reply = result?;
            let reveal = match reply.answer.as_deref().map(str::trim) {
                Some(answer) if !answer.is_empty() => Some((row + 1, Word::parse(answer)?)),
                _ => None,
            };
            state.reconcile(&reply.snapshot, reveal)
        });
        drop(guard);
        outcome
    }

    fn begin(
        &self,
        op: Operation,
        check: impl FnOnce(&ControllerState) -> Result<(), IgnoreReason>,
    ) -> Result<InFlight<'_>, IgnoreReason> {
        let mut state = lock(&self.state);
        if let Err(reason) = check(&*state) {
            debug!(%op, ?reason, "ignoring request");
            return Err(reason);
        }
        state.in_flight = Some(op);
        Ok(InFlight {
            state: &self.state,
            generation: state.generation,
        })
    }

    /// Applies a reply unless a newer game has started since the request went out.
    fn finish(
        &self,
        guard: &InFlight<'_>,
        apply: impl FnOnce(&mut ControllerState) -> Result<ActionOutcome, ServiceError>,
    ) -> ActionOutcome {
        let mut state = lock(&self.state);
        if state.generation != guard.generation {
            warn!("dropping reply from a superseded game");
            return ActionOutcome::Ignored(IgnoreReason::Stale);
        }
        state.in_flight = None;
        match apply(&mut *state) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("session request failed: {err}");
                ActionOutcome::Failed(err)
            }
        }
    }

    async fn call<T>(
        &self,
        request: impl Future<Output = Result<T, ServiceError>>,
    ) -> Result<T, ServiceError> {
        match tokio::time::timeout(self.request_timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Timeout(self.request_timeout)),
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
