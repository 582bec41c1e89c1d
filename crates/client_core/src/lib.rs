pub mod config;
pub mod controller;
pub mod error;
pub mod protocol_client;
pub mod session;
pub mod transport;
pub mod view;

pub use config::{load_settings, ClientSettings, SettingsOverrides};
pub use controller::{run_effect, GameController};
pub use error::{ConfigError, TransportError};
pub use protocol_client::AkinatorApi;
pub use session::{
    AnswerChoice, Effect, RequestStage, RequestTag, SessionEvent, SessionFailure, SessionState,
    DONT_KNOW_LABEL,
};
pub use transport::{ApiTransport, Endpoint, HttpGateway};
pub use view::{
    answer_options, AnswerOption, DetailOverlay, FormCapabilities, OverlayKey, QuestionForm,
};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
