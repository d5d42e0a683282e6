//! UI layer for the desktop GUI: app shell and tile theme.

pub mod app;
pub mod theme;

pub use app::WordleApp;
