//! UI layer for desktop GUI: app shell and reusable widgets.

pub mod app;
pub mod widgets;

pub use app::AkinatorApp;
