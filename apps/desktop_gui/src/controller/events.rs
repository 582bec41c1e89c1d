//! UI/backend events and error modeling for desktop GUI controller.

use client_core::SessionEvent;

use crate::backend_bridge::images::PreviewImage;

pub enum UiEvent {
    Info(String),
    /// A request finished; feed it back into the session reducer.
    Session(SessionEvent),
    ImageLoaded {
        url: String,
        image: PreviewImage,
    },
    ImageFailed {
        url: String,
        reason: String,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    NotFound,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CommandQueue,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("404") || message_lower.contains("not found") {
            UiErrorCategory::NotFound
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
            || message_lower.contains("scheme must be")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnected")
            || message_lower.contains("queue is full")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Errors the user can clear by trying again without changing settings.
    pub fn is_transient(&self) -> bool {
        self.category == UiErrorCategory::Transport
            && self.context != UiErrorContext::BackendStartup
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_invalid_base_url_as_validation() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "backend worker startup failure: invalid base url 'ftp://x': scheme must be http or https, got 'ftp'",
        );
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert!(!err.is_transient());
    }

    #[test]
    fn classifies_command_processor_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::CommandQueue,
            "Backend command processor disconnected; restart the app",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert!(err.is_transient());
    }

    #[test]
    fn startup_transport_failures_are_not_transient() {
        let err = UiError::from_message(UiErrorContext::BackendStartup, "connection refused");
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert!(!err.is_transient());
    }

    #[test]
    fn unmatched_messages_fall_back_to_unknown() {
        let err = UiError::from_message(UiErrorContext::General, "something odd");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.message(), "something odd");
        assert_eq!(err.context(), UiErrorContext::General);
    }
}
