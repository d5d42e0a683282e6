//! Client side of the word-guessing assistant: the feedback grid, the session
//! service boundary and the controller that keeps them in sync.

pub mod config;
pub mod controller;
pub mod grid;
pub mod http;
pub mod panels;
pub mod service;

pub use config::{load_settings, ClientSettings};
pub use controller::{ActionOutcome, GameView, IgnoreReason, Operation, Phase, SessionController};
pub use grid::{Grid, GridError, Tile};
pub use http::HttpSessionService;
pub use panels::PanelState;
pub use service::{InjectReply, ServiceError, SessionService};

/// Controller wired to the HTTP session service described by `settings`.
pub fn connect(settings: &ClientSettings) -> anyhow::Result<SessionController<HttpSessionService>> {
    let base_url = settings.base_url()?;
    let service = HttpSessionService::new(base_url, settings.request_timeout)?;
    Ok(SessionController::new(service, settings.request_timeout))
}
