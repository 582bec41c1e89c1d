//! Backend commands queued from UI to backend worker.

use client_core::Effect;

#[derive(Debug, Clone)]
pub enum BackendCommand {
    /// Perform a request the session reducer asked for.
    Execute(Effect),
    /// Download and decode an image for display.
    FetchImage { url: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Execute(effect) => effect.stage().label(),
            Self::FetchImage { .. } => "fetch_image",
        }
    }
}
